//! Billing domain: the payment ledger and gateway reconciliation types.

mod derivation;
mod errors;
mod gateway_event;
mod payment_record;
mod webhook_verifier;

pub use derivation::{block_reason_for, derived_status};
pub use errors::ReconcileError;
pub use gateway_event::{GatewayEvent, GatewayEventKind};
pub use payment_record::{PaymentRecord, PaymentStatus, RecordOrigin};
pub use webhook_verifier::{compute_signature_header, GatewayWebhookVerifier, SignatureHeader};
