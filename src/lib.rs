//! # python-discovery
//!
//! Python interpreter discovery and provisioning for automation contexts
//! (build agents, setup scripts) where an exact interpreter path must be
//! returned reliably across Windows, Linux and macOS.
//!
//! Discovery probes an ordered set of platform-specific sources, short
//! circuiting on the first interpreter whose major.minor version matches:
//!
//! 1. the CI hosted tool cache (Windows agents),
//! 2. launch-command candidates such as `py -3.11`, `python3` and
//!    `python`, each asked to introspect its own path and version,
//! 3. the Windows installation registry.
//!
//! Windows App-Execution-Alias stubs are rejected as false positives. When
//! nothing matches and the caller permits it, the platform's native
//! package manager (apt, winget/choco, brew) installs the interpreter and
//! a second locate pass verifies the result; a path is never fabricated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use python_discovery::{CancellationToken, PythonDiscovery};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let discovery = PythonDiscovery::new();
//!     let cancel = CancellationToken::new();
//!
//!     // Locate python 3.11, installing it if necessary.
//!     match discovery.ensure_installed("3.11", true, &cancel).await {
//!         Ok(path) => println!("python 3.11 at {}", path.display()),
//!         Err(error) => eprintln!("{error}"),
//!     }
//!
//!     // Ask a specific command where its interpreter lives.
//!     if let Ok(path) = discovery.resolve_path("python3", &cancel).await {
//!         println!("python3 resolves to {}", path.display());
//!     }
//! }
//! ```

mod discovery;
mod error;
mod fs;
mod install;
mod locate;
mod platform;
mod probing;
mod process;
mod registry;
#[cfg(test)]
mod test_support;
mod version;

pub use discovery::PythonDiscovery;
pub use error::DiscoveryError;
pub use fs::{FileSystem, StdFileSystem};
pub use install::{InstallError, PackageManager};
pub use platform::{HostPlatform, OsFamily, PlatformInfo};
pub use process::{ProcessRunner, RunError, TokioRunner};
pub use registry::{RegistryHive, RegistryReader, SystemRegistry};
pub use version::VersionRequest;

pub use tokio_util::sync::CancellationToken;
