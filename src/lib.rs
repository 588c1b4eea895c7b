pub mod address;
pub mod config;
pub mod device;
pub mod notify;
pub mod server;
pub mod state;
pub mod toggle;

pub mod prelude {
    pub use crate::{
        address::*, config::*, device::*, notify::*, state::*, toggle::*,
    };
    pub use common::{LedColor, LedCommand, LedRecord, Toast, ViewState};
}
