mod desc;
pub use desc::*;

mod camera;
pub use camera::*;

mod cursor;
pub use cursor::*;

mod movement;
pub use movement::*;

mod vectors;
pub use vectors::*;
