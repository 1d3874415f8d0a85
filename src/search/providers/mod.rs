pub mod unsplash;

pub use unsplash::UnsplashProvider;
