/// Point-cloud JSON asset, one-shot load tracking, and spawn-when-ready.
pub mod point_cloud;
