mod ball;
mod button;
mod countdown;
mod fps_counter;
mod paddle;

pub use ball::{Ball, BallMotion, BallOptions};
pub use button::{Button, ButtonOptions};
pub use countdown::{Countdown, CountdownOptions};
pub use fps_counter::FpsCounter;
pub use paddle::{Paddle, PaddleControl, PaddleOptions, Steer};
