//! The Apache install sequence
//!
//! Order is fixed here and nowhere else. Each step is listed after the
//! steps whose effects it depends on.

pub mod package;
pub mod permissions;
pub mod service;
pub mod test_page;

use provision::Pipeline;

use crate::config::InstallerConfig;

pub use package::{PackageInstall, SystemUpdate};
pub use permissions::{GroupMembership, Ownership, TreeMode};
pub use service::{ServiceEnable, ServiceStart, ServiceStatus};
pub use test_page::TestPage;

/// Build the full provisioning pipeline for a config
pub fn pipeline(config: &InstallerConfig) -> Pipeline {
    Pipeline::new()
        .with_step(SystemUpdate)
        .with_step(PackageInstall::new(&config.package))
        .with_step(ServiceStart::new(&config.service))
        .with_step(ServiceEnable::new(&config.service))
        .with_step(GroupMembership {
            user: config.web_user.clone(),
            group: config.web_group.clone(),
        })
        .with_step(Ownership {
            root: config.web_root.clone(),
            user: config.web_user.clone(),
            group: config.web_group.clone(),
        })
        .with_step(TreeMode::directories(config.web_root.clone()))
        .with_step(TreeMode::files(config.web_root.clone()))
        .with_step(TestPage::new(config.test_page_path(), config.owner_spec()))
        .with_step(ServiceStatus::new(&config.service))
}
