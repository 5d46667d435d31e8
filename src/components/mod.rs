mod button;
mod input_field;

pub use button::Button;
pub use input_field::{InputField, InputKind};
