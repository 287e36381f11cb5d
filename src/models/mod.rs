pub mod batch;
pub mod invitation;
pub mod loaders;
pub mod options;
pub mod scenario;
pub mod users;

pub use batch::{select_batch_row, BatchRow, BatchSelection, BatchState};
pub use invitation::{check_invitation_counts, InvitationStatus};
pub use loaders::{load_all_scenarios, load_toml_to_scenario};
pub use options::OptionTable;
pub use scenario::{BatchRequest, DatasetEntry, ExpectedStatus, Scenario, ScenarioStep};
pub use users::{TestUser, UserDirectory};
