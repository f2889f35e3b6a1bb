//! # File I/O Module
//!
//! Project persistence with safety features:
//! - **Atomic saves**: Write to .tmp, fsync, rename so a crash never leaves a half-written file
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility before loading
//!
//! ## File Format
//!
//! Projects are saved as `.cmb` (Camber) files containing JSON.
//! Lock files use `.cmb.lock` extension with metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{save_project, load_project, FileLock};
//! use beam_core::project::BeamProject;
//! use std::path::Path;
//!
//! let project = BeamProject::new("Engineer", "25-001", "Client");
//! let path = Path::new("warehouse_beam.cmb");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//!
//! // Save with atomic write
//! save_project(&project, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{BeamError, BeamResult};
use crate::project::{BeamProject, SCHEMA_VERSION};

/// Lock file metadata stored in .cmb.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
#[derive(Debug)]
pub struct FileLock {
    /// Path to the project file this lock protects
    project_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the .cmb project file
    /// * `user_id` - Identifier for the user acquiring the lock
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(BeamError::FileLocked)` - Another process holds the lock
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use beam_core::file_io::FileLock;
    /// use std::path::Path;
    ///
    /// let lock = FileLock::acquire(Path::new("project.cmb"), "user@email.com")?;
    /// // ... do work ...
    /// drop(lock); // releases lock
    /// # Ok::<(), beam_core::errors::BeamError>(())
    /// ```
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> BeamResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // A live lock belongs to someone else; a stale one can be taken over
        if let Some(existing) = active_lock(&lock_path) {
            return Err(BeamError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        // Create/open the lock file
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                BeamError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        // Try to acquire exclusive OS-level lock (non-blocking)
        lock_file.try_lock_exclusive().map_err(|_| {
            BeamError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        // Write lock info through the same handle so the OS lock stays held
        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| {
            BeamError::SerializationError {
                reason: e.to_string(),
            }
        })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            BeamError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            BeamError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        active_lock(&lock_path_for(path))
    }

    /// Get the path to the project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the lock file
        let _ = fs::remove_file(&self.lock_path);
        // OS lock is released when _lock_file is dropped
    }
}

/// Get the lock file path for a project file
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read the lock file, returning its info only if the lock is still live
fn active_lock(lock_path: &Path) -> Option<LockInfo> {
    if !lock_path.exists() {
        return None;
    }
    let info = read_lock_info(lock_path).ok()?;
    if is_lock_stale(&info) {
        None
    } else {
        Some(info)
    }
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> BeamResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        BeamError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| BeamError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is no longer running)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            // Same machine - check whether the process still exists
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    // If PID not found, lock is stale
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // Locks older than 24 hours are considered abandoned regardless of machine
    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .cmb (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
///
/// # Arguments
///
/// * `project` - The project to save
/// * `path` - Path to save to (should end in .cmb)
///
/// # Example
///
/// ```rust,no_run
/// use beam_core::file_io::save_project;
/// use beam_core::project::BeamProject;
/// use std::path::Path;
///
/// let project = BeamProject::new("Engineer", "25-001", "Client");
/// save_project(&project, Path::new("warehouse_beam.cmb"))?;
/// # Ok::<(), beam_core::errors::BeamError>(())
/// ```
pub fn save_project(project: &BeamProject, path: &Path) -> BeamResult<()> {
    // Serialize to JSON
    let json = serde_json::to_string_pretty(project).map_err(|e| BeamError::SerializationError {
        reason: e.to_string(),
    })?;

    // Create temp file path
    let tmp_path = path.with_extension("cmb.tmp");

    // Write to temp file
    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        BeamError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        BeamError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    // Sync to disk
    tmp_file.sync_all().map_err(|e| {
        BeamError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    // Atomic rename
    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        BeamError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project from a file.
///
/// # Arguments
///
/// * `path` - Path to the .cmb file
///
/// # Returns
///
/// * `Ok(BeamProject)` - Successfully loaded project
/// * `Err(BeamError::VersionMismatch)` - File version is incompatible
/// * `Err(BeamError::SerializationError)` - Invalid JSON
/// * `Err(BeamError::FileError)` - I/O error
///
/// # Example
///
/// ```rust,no_run
/// use beam_core::file_io::load_project;
/// use std::path::Path;
///
/// let project = load_project(Path::new("warehouse_beam.cmb"))?;
/// println!("Loaded project: {}", project.metadata.job_id);
/// # Ok::<(), beam_core::errors::BeamError>(())
/// ```
pub fn load_project(path: &Path) -> BeamResult<BeamProject> {
    // Read file contents
    let mut file = File::open(path).map_err(|e| {
        BeamError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        BeamError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    // Parse JSON
    let project: BeamProject =
        serde_json::from_str(&contents).map_err(|e| BeamError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    // Validate schema version
    validate_version(&project.metadata.version)?;

    Ok(project)
}

/// Load a project, returning whether it's read-only due to a lock.
///
/// # Returns
///
/// * `Ok((BeamProject, None))` - Loaded successfully, no lock
/// * `Ok((BeamProject, Some(LockInfo)))` - Loaded, but another user has the lock
/// * `Err(_)` - Failed to load
pub fn load_project_with_lock_check(path: &Path) -> BeamResult<(BeamProject, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. Within the 0.x series every minor bump may
/// break the schema, so a file written by a newer minor is refused.
fn validate_version(file_version: &str) -> BeamResult<()> {
    let mismatch = || BeamError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = parse_version(file_version).ok_or_else(mismatch)?;
    let current = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file.0 != current.0 {
        return Err(mismatch());
    }

    if current.0 == 0 && file.1 > current.1 {
        return Err(mismatch());
    }

    Ok(())
}

/// Parse "major.minor[.patch]" into (major, minor); a bare major gets minor 0
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}
