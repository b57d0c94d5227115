pub mod visual_loader;
