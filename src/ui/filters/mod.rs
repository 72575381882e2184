pub mod descriptor;
pub mod dropdown;
pub mod top_search;
