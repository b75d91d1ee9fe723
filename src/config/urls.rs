//! Source repository URLs

/// Remote name of the NuttX kernel repository
pub const NUTTX_REMOTE: &str = "nuttx";

/// Remote name of the NuttX applications repository
pub const APPS_REMOTE: &str = "apps";

/// Upstream NuttX repository
pub const NUTTX_REPO: &str = "https://github.com/apache/nuttx";

/// Upstream NuttX applications repository
pub const APPS_REPO: &str = "https://github.com/apache/nuttx-apps";
