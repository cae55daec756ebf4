mod gaussian;
pub mod gaussian_region_blurrer;
