pub mod commit;
pub mod issue;

pub use commit::*;
pub use issue::*;
