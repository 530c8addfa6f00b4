//! Domain entities - the core business objects.

mod post;
mod slug;
mod tournament;

pub use post::{Post, PostDraft};
pub use slug::{RESERVED_SLUGS, validate_slug};
pub use tournament::{Tournament, TournamentDraft, TournamentStatus};
