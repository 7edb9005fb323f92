pub mod state;

pub use state::{MainPanel, SetupField, SetupTab, Window};
