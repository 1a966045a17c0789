mod gradient;
mod gradient_descent;

pub use gradient::{Gradient, error2_at};
pub use gradient_descent::{GradientDescent, Step};
