//! Derivation of the ordered operation list for a stream edit.
//!
//! The application materializes each [`StepKind`] into a concrete
//! [`TransactionStep`](crate::queue::TransactionStep) via its ledger
//! collaborator; this module only decides what to do and in what order.

use serde::{Deserialize, Serialize};

use crate::domain::{FlowRate, Wei};
use crate::error::EngineError;

/// One planned monetary operation, in required execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Grant the super token an allowance on the underlying token.
    ApproveUnderlying { amount: Wei },
    /// Wrap an underlying balance into streamable form.
    Wrap { amount: Wei },
    /// Grant the allocation strategy flow-operator permissions.
    UpdatePermissions,
    /// Open a stream at the given rate.
    CreateFlow { flow_rate: FlowRate },
    /// Change an existing stream to a new non-zero rate.
    UpdateFlow { flow_rate: FlowRate },
    /// Close the stream.
    DeleteFlow,
    /// Register the new rate with the allocation strategy.
    Allocate { flow_rate: FlowRate },
}

/// Everything the planner needs to know about the intended edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEditRequest {
    pub current_flow_rate: FlowRate,
    pub new_flow_rate: FlowRate,
    /// How much underlying balance to wrap before streaming; zero skips the
    /// wrap entirely.
    pub wrap_amount: Wei,
    /// Current allowance on the underlying token. `None` means the token is
    /// a native-asset super token that needs no approval.
    pub underlying_allowance: Option<Wei>,
    /// Whether the allocation strategy already holds flow-operator
    /// permissions for this sender.
    pub has_operator_permissions: bool,
}

/// Build the ordered operation list for a stream edit:
/// approve → wrap → set-permissions → create/update/delete flow → allocate.
///
/// # Errors
/// Returns `InvalidArgument` for negative rates or amounts, and for an edit
/// that would do nothing at all.
pub fn plan_stream_edit(request: &StreamEditRequest) -> Result<Vec<StepKind>, EngineError> {
    if request.new_flow_rate.is_negative() || request.current_flow_rate.is_negative() {
        return Err(EngineError::InvalidArgument(
            "contribution flow rates must be non-negative".to_string(),
        ));
    }
    if request.wrap_amount.is_negative() {
        return Err(EngineError::InvalidArgument(
            "wrap amount must be non-negative".to_string(),
        ));
    }

    let mut steps = Vec::new();

    if request.wrap_amount.is_positive() {
        if let Some(allowance) = request.underlying_allowance {
            if allowance < request.wrap_amount {
                steps.push(StepKind::ApproveUnderlying {
                    amount: request.wrap_amount,
                });
            }
        }
        steps.push(StepKind::Wrap {
            amount: request.wrap_amount,
        });
    }

    let rate_changed = request.new_flow_rate != request.current_flow_rate;
    if rate_changed {
        if !request.has_operator_permissions {
            steps.push(StepKind::UpdatePermissions);
        }

        if request.current_flow_rate.is_zero() {
            steps.push(StepKind::CreateFlow {
                flow_rate: request.new_flow_rate,
            });
        } else if request.new_flow_rate.is_zero() {
            steps.push(StepKind::DeleteFlow);
        } else {
            steps.push(StepKind::UpdateFlow {
                flow_rate: request.new_flow_rate,
            });
        }

        steps.push(StepKind::Allocate {
            flow_rate: request.new_flow_rate,
        });
    }

    if steps.is_empty() {
        return Err(EngineError::InvalidArgument(
            "stream edit changes neither the rate nor the wrapped balance".to_string(),
        ));
    }

    Ok(steps)
}

/// The wrap amount suggested when a user picks a stream value: three
/// intervals' worth of topup, so the stream survives a while without
/// re-wrapping.
pub fn suggested_wrap_amount(amount_per_interval: Wei) -> Result<Wei, EngineError> {
    amount_per_interval
        .checked_mul(Wei::from(3))
        .ok_or(EngineError::Overflow)
}
