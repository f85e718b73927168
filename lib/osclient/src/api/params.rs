//! Enumerated parameter values shared by several endpoints.

use derive_more::Display;

use crate::ParamValue;

macro_rules! wire_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

wire_param!(
    ExpandWildcards,
    ByteUnit,
    TimeUnit,
    HealthStatus,
    Level,
    WaitForEvents,
    VersionType,
    SearchType,
    GroupBy,
);

/// Which kinds of indices wildcard expressions expand to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ExpandWildcards {
    /// Open indices.
    #[display("open")]
    Open,
    /// Closed indices.
    #[display("closed")]
    Closed,
    /// Hidden indices.
    #[display("hidden")]
    Hidden,
    /// No expansion.
    #[display("none")]
    None,
    /// All indices.
    #[display("all")]
    All,
}

/// Unit used to display byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ByteUnit {
    /// Bytes.
    #[display("b")]
    B,
    /// Kilobytes.
    #[display("kb")]
    Kb,
    /// Megabytes.
    #[display("mb")]
    Mb,
    /// Gigabytes.
    #[display("gb")]
    Gb,
    /// Terabytes.
    #[display("tb")]
    Tb,
    /// Petabytes.
    #[display("pb")]
    Pb,
}

/// Unit used to display time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimeUnit {
    /// Days.
    #[display("d")]
    Days,
    /// Hours.
    #[display("h")]
    Hours,
    /// Minutes.
    #[display("m")]
    Minutes,
    /// Seconds.
    #[display("s")]
    Seconds,
    /// Milliseconds.
    #[display("ms")]
    Millis,
    /// Microseconds.
    #[display("micros")]
    Micros,
    /// Nanoseconds.
    #[display("nanos")]
    Nanos,
}

/// Cluster health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HealthStatus {
    /// All shards allocated.
    #[display("green")]
    Green,
    /// All primaries allocated, some replicas not.
    #[display("yellow")]
    Yellow,
    /// Some primaries unallocated.
    #[display("red")]
    Red,
}

/// Detail level of health information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Level {
    /// Cluster summary.
    #[display("cluster")]
    Cluster,
    /// Per index.
    #[display("indices")]
    Indices,
    /// Per shard.
    #[display("shards")]
    Shards,
    /// Awareness attributes.
    #[display("awareness_attributes")]
    AwarenessAttributes,
}

/// Priority of pending cluster events to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WaitForEvents {
    /// Immediate priority.
    #[display("immediate")]
    Immediate,
    /// Urgent priority.
    #[display("urgent")]
    Urgent,
    /// High priority.
    #[display("high")]
    High,
    /// Normal priority.
    #[display("normal")]
    Normal,
    /// Low priority.
    #[display("low")]
    Low,
    /// Languid priority.
    #[display("languid")]
    Languid,
}

/// Document versioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum VersionType {
    /// Versions assigned by the cluster.
    #[display("internal")]
    Internal,
    /// Externally assigned, must be greater than the stored version.
    #[display("external")]
    External,
    /// Externally assigned, greater than or equal to the stored version.
    #[display("external_gte")]
    ExternalGte,
    /// Overwrite regardless of version.
    #[display("force")]
    Force,
}

/// How a multi-search scores documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SearchType {
    /// Score with per-shard term statistics.
    #[display("query_then_fetch")]
    QueryThenFetch,
    /// Score with global term statistics.
    #[display("dfs_query_then_fetch")]
    DfsQueryThenFetch,
}

/// Grouping of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GroupBy {
    /// Group by node.
    #[display("nodes")]
    Nodes,
    /// Group by parent task.
    #[display("parents")]
    Parents,
    /// Flat list.
    #[display("none")]
    None,
}
