use tokio::sync::mpsc;

use crate::error::{GatewayError, ViewError};
use crate::render::DisplayRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInput {
    /// The filter input changed; carries the full current value.
    FilterChanged(String),
}

pub type InputStream = mpsc::Receiver<HostInput>;

/// Host surface: the filter input and the list container.
///
/// `show_rows` replaces the entire displayed list. Closing the input stream
/// tears the view down.
pub trait ViewHostPort: Send + Sync {
    fn subscribe_input(&self) -> Result<InputStream, GatewayError>;

    fn show_rows(&self, rows: Vec<DisplayRow>);

    /// Surface an error that has no other channel to the user.
    fn report(&self, error: &ViewError);
}
