// Data models for pose estimation and emergency guides

pub mod guide;
pub mod pose;
