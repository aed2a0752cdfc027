//! Sequential prompt state machine for requests and orders
//!
//! A workflow asks for one field at a time in a fixed order. Every answer is
//! trimmed; a blank or cancelled answer ends the workflow in `Aborted` and the
//! collected answers are dropped with it. Only the final answer yields a
//! `RequestDraft`.

use super::field::FormField;
use crate::state::records::{RequestDraft, RequestKind};

/// Fields a workflow can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Product,
    CustomerName,
    ContactInfo,
    Quantity,
}

impl PromptField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::CustomerName => "customer_name",
            Self::ContactInfo => "contact_info",
            Self::Quantity => "quantity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::CustomerName => "Name",
            Self::ContactInfo => "Contact info",
            Self::Quantity => "Quantity",
        }
    }

    /// Alert shown when this field is left blank.
    ///
    /// Skipping the very first question of a new-item request is treated as
    /// the user backing out, so it has no alert.
    pub fn required_message(self) -> Option<&'static str> {
        match self {
            Self::Product => None,
            Self::CustomerName => Some("Name is required to submit a request."),
            Self::ContactInfo => Some("Contact info is required to submit a request."),
            Self::Quantity => Some("Quantity is required to submit a request."),
        }
    }
}

/// Why a workflow stopped before completing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowAbort {
    pub field: PromptField,
    /// True when the prompt was dismissed rather than answered blank
    pub cancelled: bool,
}

impl WorkflowAbort {
    pub fn message(&self) -> Option<&'static str> {
        self.field.required_message()
    }
}

/// Outcome of answering or dismissing the current prompt
#[derive(Debug)]
pub enum WorkflowStep {
    /// More prompts remain
    Collecting(RequestWorkflow),
    /// Terminal: nothing is built or sent
    Aborted(WorkflowAbort),
    /// Terminal: every field passed validation
    Completed(RequestDraft),
}

/// In-progress request or order
#[derive(Debug, Clone)]
pub struct RequestWorkflow {
    kind: RequestKind,
    steps: Vec<PromptField>,
    active_step: usize,
    /// Input of the prompt currently shown
    pub input: FormField,
    product: Option<String>,
    customer_name: Option<String>,
    contact_info: Option<String>,
    quantity: Option<String>,
}

impl RequestWorkflow {
    /// Request an item that is not in the catalog: product, name, contact
    pub fn new_item() -> Self {
        Self::with_steps(
            RequestKind::NewItemRequest,
            vec![
                PromptField::Product,
                PromptField::CustomerName,
                PromptField::ContactInfo,
            ],
            None,
        )
    }

    /// Order a listed product: name, contact, quantity
    pub fn order(product: &str) -> Self {
        Self::with_steps(
            RequestKind::ProductOrder,
            vec![
                PromptField::CustomerName,
                PromptField::ContactInfo,
                PromptField::Quantity,
            ],
            Some(product.to_string()),
        )
    }

    fn with_steps(kind: RequestKind, steps: Vec<PromptField>, product: Option<String>) -> Self {
        let first = steps[0];
        Self {
            kind,
            steps,
            active_step: 0,
            input: FormField::text(first.name(), first.label()),
            product,
            customer_name: None,
            contact_info: None,
            quantity: None,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Product being ordered, or the requested product once answered
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn current_field(&self) -> PromptField {
        self.steps[self.active_step]
    }

    /// 1-based position of the current prompt and the total number of prompts
    pub fn progress(&self) -> (usize, usize) {
        (self.active_step + 1, self.steps.len())
    }

    /// Dialog title for the current prompt
    pub fn title(&self) -> String {
        match self.kind {
            RequestKind::NewItemRequest => "Request New Item".to_string(),
            RequestKind::ProductOrder => format!(
                "Order {}",
                self.product.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Question text for the current prompt
    pub fn prompt_text(&self) -> String {
        match self.current_field() {
            PromptField::Product => "What peptide would you like to request?\n\n(e.g., \"Semaglutide 5mg\" or \"BPC-157 + TB-500 blend\")".to_string(),
            PromptField::CustomerName => "Please enter your name:".to_string(),
            PromptField::ContactInfo => {
                "Please enter your contact info:\n(Telegram username, phone number, or email)"
                    .to_string()
            }
            PromptField::Quantity => format!(
                "How many units of {} would you like?\n(Enter number or \"TBD\" if unsure)",
                self.product.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Accept the current input and move to the next prompt
    pub fn submit(mut self) -> WorkflowStep {
        let field = self.current_field();
        if self.input.is_blank() {
            tracing::debug!("Workflow aborted: {} left blank", field.name());
            return WorkflowStep::Aborted(WorkflowAbort {
                field,
                cancelled: false,
            });
        }

        let answer = self.input.trimmed().to_string();
        match field {
            PromptField::Product => self.product = Some(answer),
            PromptField::CustomerName => self.customer_name = Some(answer),
            PromptField::ContactInfo => self.contact_info = Some(answer),
            PromptField::Quantity => self.quantity = Some(answer),
        }

        if self.active_step + 1 < self.steps.len() {
            self.active_step += 1;
            let next = self.current_field();
            self.input = FormField::text(next.name(), next.label());
            return WorkflowStep::Collecting(self);
        }

        match self.into_draft() {
            Some(draft) => WorkflowStep::Completed(draft),
            // Unreachable with the fixed step lists; abort rather than send a partial record
            None => WorkflowStep::Aborted(WorkflowAbort {
                field,
                cancelled: false,
            }),
        }
    }

    /// Dismiss the current prompt
    pub fn cancel(self) -> WorkflowStep {
        let field = self.current_field();
        tracing::debug!("Workflow cancelled at {}", field.name());
        WorkflowStep::Aborted(WorkflowAbort {
            field,
            cancelled: true,
        })
    }

    fn into_draft(self) -> Option<RequestDraft> {
        let product = self.product.filter(|p| !p.trim().is_empty())?;
        let quantity = match self.kind {
            RequestKind::ProductOrder => Some(self.quantity?),
            RequestKind::NewItemRequest => None,
        };
        Some(RequestDraft::new(
            self.kind,
            product,
            self.customer_name?,
            self.contact_info?,
            quantity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(workflow: &mut RequestWorkflow, text: &str) {
        for c in text.chars() {
            workflow.input.push_char(c);
        }
    }

    /// Answer every prompt in order, returning the final step
    fn run(mut workflow: RequestWorkflow, answers: &[&str]) -> WorkflowStep {
        let mut answers = answers.iter();
        loop {
            type_into(&mut workflow, answers.next().copied().unwrap_or(""));
            match workflow.submit() {
                WorkflowStep::Collecting(next) => workflow = next,
                terminal => return terminal,
            }
        }
    }

    #[test]
    fn test_new_item_prompts_in_order() {
        let mut workflow = RequestWorkflow::new_item();
        let mut seen = vec![workflow.current_field()];
        for answer in ["Semaglutide 5mg", "Sam"] {
            type_into(&mut workflow, answer);
            workflow = match workflow.submit() {
                WorkflowStep::Collecting(next) => next,
                other => panic!("unexpected step: {other:?}"),
            };
            seen.push(workflow.current_field());
        }
        assert_eq!(
            seen,
            vec![
                PromptField::Product,
                PromptField::CustomerName,
                PromptField::ContactInfo
            ]
        );
    }

    #[test]
    fn test_order_prompts_in_order() {
        let workflow = RequestWorkflow::order("BPC-157");
        assert_eq!(workflow.current_field(), PromptField::CustomerName);
        assert_eq!(workflow.progress(), (1, 3));
        assert_eq!(workflow.product(), Some("BPC-157"));
    }

    #[test]
    fn test_completed_order_trims_answers() {
        let step = run(
            RequestWorkflow::order("BPC-157"),
            &["  Jane ", "jane@x.com\t", " 5 "],
        );
        let WorkflowStep::Completed(draft) = step else {
            panic!("expected completion");
        };
        assert_eq!(draft.kind(), RequestKind::ProductOrder);
        assert_eq!(
            draft,
            RequestDraft::new(
                RequestKind::ProductOrder,
                "BPC-157".to_string(),
                "Jane".to_string(),
                "jane@x.com".to_string(),
                Some("5".to_string()),
            )
        );
    }

    #[test]
    fn test_completed_new_item_has_no_quantity() {
        let step = run(RequestWorkflow::new_item(), &["GHK-Cu", "Ann", "@ann"]);
        let WorkflowStep::Completed(draft) = step else {
            panic!("expected completion");
        };
        assert_eq!(draft.kind(), RequestKind::NewItemRequest);
        assert_eq!(draft.product(), "GHK-Cu");
        assert_eq!(
            draft,
            RequestDraft::new(
                RequestKind::NewItemRequest,
                "GHK-Cu".to_string(),
                "Ann".to_string(),
                "@ann".to_string(),
                None,
            )
        );
    }

    #[test]
    fn test_blank_answer_at_any_prompt_aborts() {
        let full = ["Jane", "jane@x.com", "5"];
        for blank_at in 0..full.len() {
            let mut answers = full.to_vec();
            answers[blank_at] = "   ";
            let step = run(RequestWorkflow::order("BPC-157"), &answers);
            assert!(
                matches!(step, WorkflowStep::Aborted(WorkflowAbort { cancelled: false, .. })),
                "blank answer at prompt {blank_at} should abort"
            );
        }
    }

    #[test]
    fn test_cancel_aborts_with_field() {
        let mut workflow = RequestWorkflow::new_item();
        type_into(&mut workflow, "TB-500");
        let WorkflowStep::Collecting(workflow) = workflow.submit() else {
            panic!("expected next prompt");
        };
        let WorkflowStep::Aborted(abort) = workflow.cancel() else {
            panic!("expected abort");
        };
        assert_eq!(abort.field, PromptField::CustomerName);
        assert!(abort.cancelled);
        assert_eq!(abort.message(), Some("Name is required to submit a request."));
    }

    #[test]
    fn test_skipping_product_prompt_is_silent() {
        let WorkflowStep::Aborted(abort) = RequestWorkflow::new_item().cancel() else {
            panic!("expected abort");
        };
        assert_eq!(abort.field, PromptField::Product);
        assert!(abort.message().is_none());
    }

    #[test]
    fn test_quantity_prompt_mentions_product() {
        let mut workflow = RequestWorkflow::order("TB-500 5mg");
        for answer in ["Jane", "@jane"] {
            type_into(&mut workflow, answer);
            workflow = match workflow.submit() {
                WorkflowStep::Collecting(next) => next,
                other => panic!("unexpected step: {other:?}"),
            };
        }
        assert_eq!(workflow.current_field(), PromptField::Quantity);
        assert!(workflow.prompt_text().contains("How many units of TB-500 5mg"));
        assert_eq!(workflow.title(), "Order TB-500 5mg");
    }

    #[test]
    fn test_each_prompt_starts_with_empty_input() {
        let mut workflow = RequestWorkflow::order("BPC-157");
        type_into(&mut workflow, "Jane");
        let WorkflowStep::Collecting(workflow) = workflow.submit() else {
            panic!("expected next prompt");
        };
        assert!(workflow.input.as_text().is_empty());
        assert_eq!(workflow.input.name, "contact_info");
    }
}
