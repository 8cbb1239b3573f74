mod cycle;
mod notification;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::cycle::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::cycle::api::*;
pub use crate::notification::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
