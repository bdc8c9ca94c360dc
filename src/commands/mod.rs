mod package_list;

pub use package_list::{package_list, print_packages, run};
