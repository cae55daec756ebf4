pub mod blur_mode;
pub mod compositor;
pub mod intensity;
pub mod mask;
pub mod region_blurrer;
