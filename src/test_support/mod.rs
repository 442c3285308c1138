// Items in this module (and submodules) are only used in test code.

mod temp_skeleton;
pub(crate) use temp_skeleton::TempSkeleton;
