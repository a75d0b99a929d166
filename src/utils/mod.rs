pub mod normal;

mod window;
pub use window::ObservationWindow;
