//! Task commands

mod close;
mod close_column;
mod mv;
mod pin;
mod reopen;
mod subscribe;

pub use close::CloseTask;
pub use close_column::CloseColumn;
pub use mv::MoveTask;
pub use pin::PinTask;
pub use reopen::ReopenTask;
pub use subscribe::SubscribeTask;
