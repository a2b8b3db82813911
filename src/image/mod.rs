pub mod f32;
pub mod io;
pub mod labels;
pub(crate) mod rows;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::labels::{ClassMap, FacetLabel};
pub use self::traits::ImageView;
