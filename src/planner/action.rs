//! Resource action types.
//!
//! Each action declares a desired piece of host state. Applying an action
//! twice converges on the same result; the executor that applies them is
//! not part of this crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ServiceIdentity;

/// Permission bits used for downloaded driver jars.
pub const DRIVER_FILE_MODE: FileMode = FileMode(0o644);

/// A single declarative resource action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceAction {
    /// A symbolic link.
    Link(LinkAction),
    /// A directory.
    Directory(DirectoryAction),
    /// A file, optionally with content, mode and guard.
    File(FileAction),
    /// A command execution.
    Execute(ExecuteAction),
}

/// Kinds of resource actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Symbolic link.
    Link,
    /// Directory.
    Directory,
    /// File.
    File,
    /// Command execution.
    Execute,
}

/// Ensures `path` is a symbolic link to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAction {
    /// Link location.
    pub path: PathBuf,
    /// Link target.
    pub to: PathBuf,
}

/// Ensures a directory exists with the given ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryAction {
    /// Directory path.
    pub path: PathBuf,
    /// Owning user.
    pub owner: String,
    /// Owning group.
    pub group: String,
    /// Create missing parents.
    pub recursive: bool,
}

/// Ensures a file exists with the given attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAction {
    /// File path.
    pub path: PathBuf,
    /// Owning user, left untouched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Owning group, left untouched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// File content, left untouched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<FileContent>,
    /// Permission bits, left untouched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FileMode>,
    /// Condition the executor checks before applying the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_if: Option<Guard>,
}

/// Where a file's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileContent {
    /// A template rendered by the executor.
    InlineTemplate {
        /// Template source.
        template: String,
    },
    /// A file fetched from a URL.
    DownloadSource {
        /// Download URL.
        url: String,
    },
}

/// A precondition evaluated by the executor at apply time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Guard {
    /// Apply only if the path exists on the host.
    PathExists {
        /// Path to test.
        path: PathBuf,
    },
}

/// Unix permission bits, serialized as a four digit octal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileMode(pub u32);

/// Runs a command given as an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteAction {
    /// Program and arguments.
    pub argv: Vec<String>,
    /// Run with elevated privileges.
    pub sudo: bool,
}

impl ResourceAction {
    /// Creates a link action.
    #[must_use]
    pub fn link(path: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self::Link(LinkAction {
            path: path.into(),
            to: to.into(),
        })
    }

    /// Creates a recursive directory action owned by `identity`.
    #[must_use]
    pub fn directory(path: impl Into<PathBuf>, identity: &ServiceIdentity) -> Self {
        Self::Directory(DirectoryAction {
            path: path.into(),
            owner: identity.user.clone(),
            group: identity.group.clone(),
            recursive: true,
        })
    }

    /// Creates a privileged execute action.
    #[must_use]
    pub const fn sudo(argv: Vec<String>) -> Self {
        Self::Execute(ExecuteAction { argv, sudo: true })
    }

    /// Returns the action's kind.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Link(_) => ActionKind::Link,
            Self::Directory(_) => ActionKind::Directory,
            Self::File(_) => ActionKind::File,
            Self::Execute(_) => ActionKind::Execute,
        }
    }

    /// Returns the filesystem path the action targets, if it targets one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Link(a) => Some(&a.path),
            Self::Directory(a) => Some(&a.path),
            Self::File(a) => Some(&a.path),
            Self::Execute(_) => None,
        }
    }

    /// Returns a short summary of the action's attributes.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::Link(a) => format!("-> {}", a.to.display()),
            Self::Directory(a) => {
                let recursive = if a.recursive { ", recursive" } else { "" };
                format!("{}:{}{recursive}", a.owner, a.group)
            }
            Self::File(a) => a.details(),
            Self::Execute(a) => {
                let prefix = if a.sudo { "sudo " } else { "" };
                format!("{prefix}{}", a.argv.join(" "))
            }
        }
    }
}

impl FileAction {
    /// Creates a file action with no attributes.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owner: None,
            group: None,
            content: None,
            mode: None,
            only_if: None,
        }
    }

    /// Sets owner and group from a service identity.
    #[must_use]
    pub fn owned_by(mut self, identity: &ServiceIdentity) -> Self {
        self.owner = Some(identity.user.clone());
        self.group = Some(identity.group.clone());
        self
    }

    /// Sets the file content.
    #[must_use]
    pub fn with_content(mut self, content: FileContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Sets the permission bits.
    #[must_use]
    pub const fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Guards the action on the file already existing.
    #[must_use]
    pub fn only_if_exists(mut self) -> Self {
        self.only_if = Some(Guard::PathExists {
            path: self.path.clone(),
        });
        self
    }

    fn details(&self) -> String {
        let mut parts = Vec::new();
        if let (Some(owner), Some(group)) = (&self.owner, &self.group) {
            parts.push(format!("{owner}:{group}"));
        }
        if let Some(mode) = self.mode {
            parts.push(format!("mode {mode}"));
        }
        match &self.content {
            Some(FileContent::InlineTemplate { .. }) => parts.push(String::from("inline template")),
            Some(FileContent::DownloadSource { url }) => parts.push(format!("download {url}")),
            None => {}
        }
        if let Some(guard) = &self.only_if {
            parts.push(format!("only_if `{guard}`"));
        }
        parts.join(", ")
    }
}

impl From<FileAction> for ResourceAction {
    fn from(action: FileAction) -> Self {
        Self::File(action)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl TryFrom<String> for FileMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        u32::from_str_radix(value.trim_start_matches("0o"), 8)
            .ok()
            .filter(|bits| *bits <= 0o7777)
            .map(Self)
            .ok_or_else(|| format!("invalid octal file mode: {value}"))
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathExists { path } => write!(f, "test -e {}", path.display()),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Link => "Link",
            Self::Directory => "Directory",
            Self::File => "File",
            Self::Execute => "Execute",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Some(path) = self.path() {
            write!(f, " {}", path.display())?;
        }
        let details = self.details();
        if !details.is_empty() {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity() -> ServiceIdentity {
        ServiceIdentity {
            user: String::from("sqoop"),
            group: String::from("hadoop"),
        }
    }

    #[test]
    fn test_file_mode_display_and_parse() {
        assert_eq!(DRIVER_FILE_MODE.to_string(), "0644");
        assert_eq!(FileMode::try_from(String::from("0755")), Ok(FileMode(0o755)));
        assert!(FileMode::try_from(String::from("0999")).is_err());
        assert!(FileMode::try_from(String::from("77777")).is_err());
    }

    #[test]
    fn test_guarded_file_serialization() {
        let action: ResourceAction = FileAction::new("/usr/lib/sqoop/conf/sqoop-site.xml")
            .owned_by(&identity())
            .only_if_exists()
            .into();

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "File",
                "path": "/usr/lib/sqoop/conf/sqoop-site.xml",
                "owner": "sqoop",
                "group": "hadoop",
                "only_if": { "kind": "path_exists", "path": "/usr/lib/sqoop/conf/sqoop-site.xml" }
            })
        );
    }

    #[test]
    fn test_download_file_serialization() {
        let action: ResourceAction = FileAction::new("/usr/lib/sqoop/lib/ojdbc.jar")
            .with_content(FileContent::DownloadSource {
                url: String::from("http://host/resources//oracle-jdbc-driver.jar"),
            })
            .with_mode(DRIVER_FILE_MODE)
            .into();

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["mode"], json!("0644"));
        assert_eq!(value["content"]["kind"], json!("download_source"));
        assert!(value.get("owner").is_none());

        let back: ResourceAction = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_display() {
        let link = ResourceAction::link("/etc/sqoop/conf", "/usr/hdp/current/sqoop-client/conf");
        assert_eq!(
            link.to_string(),
            "Link /etc/sqoop/conf (-> /usr/hdp/current/sqoop-client/conf)"
        );

        let dir = ResourceAction::directory("/usr/lib/sqoop/conf", &identity());
        assert_eq!(dir.to_string(), "Directory /usr/lib/sqoop/conf (sqoop:hadoop, recursive)");

        let exec = ResourceAction::sudo(vec![String::from("hdp-select"), String::from("set")]);
        assert_eq!(exec.kind(), ActionKind::Execute);
        assert!(exec.path().is_none());
        assert_eq!(exec.to_string(), "Execute (sudo hdp-select set)");

        let guarded = FileAction::new("/x").only_if_exists();
        assert_eq!(guarded.details(), "only_if `test -e /x`");
    }
}
