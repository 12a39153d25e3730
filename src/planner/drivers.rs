//! JDBC driver catalog.
//!
//! Maps driver class names to the jar a component expects in its library
//! directory and the file the resource server publishes it under. Adding a
//! driver is one table entry.

use std::collections::BTreeMap;

/// A known JDBC driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JdbcDriver {
    /// Fully qualified driver class name.
    pub class_name: &'static str,
    /// Jar file name inside the library directory.
    pub jar_name: &'static str,
    /// File name on the resource server.
    pub download_name: &'static str,
}

/// Every driver the planner knows how to install.
pub const JDBC_DRIVERS: &[JdbcDriver] = &[
    JdbcDriver {
        class_name: "com.microsoft.sqlserver.jdbc.SQLServerDriver",
        jar_name: "sqljdbc4.jar",
        download_name: "mssql-jdbc-driver.jar",
    },
    JdbcDriver {
        class_name: "com.mysql.jdbc.Driver",
        jar_name: "mysql-connector-java.jar",
        download_name: "mysql-jdbc-driver.jar",
    },
    JdbcDriver {
        class_name: "org.postgresql.Driver",
        jar_name: "postgresql-jdbc.jar",
        download_name: "postgres-jdbc-driver.jar",
    },
    JdbcDriver {
        class_name: "oracle.jdbc.driver.OracleDriver",
        jar_name: "ojdbc.jar",
        download_name: "oracle-jdbc-driver.jar",
    },
    JdbcDriver {
        class_name: "org.hsqldb.jdbc.JDBCDriver",
        jar_name: "hsqldb.jar",
        download_name: "hsqldb-jdbc-driver.jar",
    },
];

/// Outcome of resolving a comma-separated driver list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DriverSelection {
    /// Recognised drivers keyed by jar name.
    pub drivers: BTreeMap<&'static str, &'static JdbcDriver>,
    /// Entries that matched no catalog driver, in list order.
    pub unknown: Vec<String>,
}

/// Looks up a driver by class name.
#[must_use]
pub fn lookup(class_name: &str) -> Option<&'static JdbcDriver> {
    JDBC_DRIVERS.iter().find(|d| d.class_name == class_name)
}

/// Resolves a comma-separated driver list such as
/// `"org.postgresql.Driver, oracle.jdbc.driver.OracleDriver"`.
///
/// Entries are trimmed and blank entries ignored. Recognised drivers are
/// keyed by jar name, which orders them and drops duplicates.
#[must_use]
pub fn resolve(list: &str) -> DriverSelection {
    let mut selection = DriverSelection::default();

    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match lookup(name) {
            Some(driver) => {
                selection.drivers.insert(driver.jar_name, driver);
            }
            None => selection.unknown.push(name.to_string()),
        }
    }

    selection
}

impl DriverSelection {
    /// Returns true if no driver was recognised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Recognised drivers in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &'static JdbcDriver> + '_ {
        self.drivers.values().copied()
    }
}
