pub mod isolate;
pub mod status;
pub mod verifier;

pub use isolate::{Isolated, map_isolated};
pub use status::{SummarySentence, VerificationStatus};
pub use verifier::{DEFAULT_MAX_PAIR_LENGTH, Verification, Verifier};
