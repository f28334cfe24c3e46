pub mod initialize_admin_registry;
pub mod add_admin;
pub mod update_admin_permissions;
pub mod deactivate_admin;
pub mod set_paused;
pub mod create_election;
pub mod add_candidate;
pub mod update_election_status;
pub mod request_voter_registration;
pub mod review_voter_registration;
pub mod cast_vote;

pub use initialize_admin_registry::*;
pub use add_admin::*;
pub use update_admin_permissions::*;
pub use deactivate_admin::*;
pub use set_paused::*;
pub use create_election::*;
pub use add_candidate::*;
pub use update_election_status::*;
pub use request_voter_registration::*;
pub use review_voter_registration::*;
pub use cast_vote::*;
