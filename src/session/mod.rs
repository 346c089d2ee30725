//! Per-request profiling sessions.
//!
//! A session packages one profiling run: the call graph built from
//! the statistics snapshot, a process-unique identifier, and
//! optional request-path/timestamp context supplied by the host.
//! Sessions are read-only after construction; the host's session
//! store owns their lifetime.

use crate::graph::builder::create_graph;
use crate::graph::callgraph::CallGraph;
use crate::graph::keys::KeyGenerator;
use crate::stats::schema::RawStatEntry;
use crate::utils::config::PATH_INFO_KEY;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// WSGI-style request context mapping.
pub type Environ = HashMap<String, String>;

/// One complete capture of a profiled execution.
#[derive(Debug, Clone)]
pub struct ProfilingSession {
    uuid: Uuid,
    graph: CallGraph,
    path: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl ProfilingSession {
    /// Build a session from a statistics snapshot.
    ///
    /// Builds the call graph exactly once and generates a fresh v4
    /// UUID. `path` is taken from `environ["PATH_INFO"]` when the
    /// mapping is supplied and carries it, without validation or
    /// normalization. The timestamp is stored verbatim. The snapshot
    /// itself is never mutated.
    pub fn new(
        stats: &[RawStatEntry],
        keys: &KeyGenerator<'_>,
        environ: Option<&Environ>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let graph = create_graph(stats, keys);
        let uuid = Uuid::new_v4();
        let path = environ.and_then(|e| e.get(PATH_INFO_KEY).cloned());

        debug!(
            "Created profiling session {} ({} nodes, path {:?})",
            uuid,
            graph.node_count(),
            path
        );

        Self {
            uuid,
            graph,
            path,
            timestamp,
        }
    }

    /// Session identifier, unique per construction.
    pub fn uuid(&self) -> String {
        self.uuid.to_string()
    }

    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// Originating request path, if the session was captured inside
    /// a request context.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// When the session was captured, if supplied.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Serializable metadata view for session stores and listings.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            uuid: self.uuid(),
            path: self.path.clone(),
            timestamp: self.timestamp,
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }
}

/// Session metadata without the graph itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub uuid: String,

    /// Originating request path, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Capture time, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Number of functions in the call graph
    pub node_count: usize,

    /// Number of caller→callee relationships
    pub edge_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::schema::{CodeHandle, Timing};

    fn sample_stats() -> Vec<RawStatEntry> {
        let a = CodeHandle::named("app", "a");
        let b = CodeHandle::named("app", "b");
        vec![
            RawStatEntry::new(a.clone(), Timing::default()),
            RawStatEntry::new(b, Timing::default()).with_caller(a, Timing::default()),
        ]
    }

    #[test]
    fn test_default_args() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();
        let session = ProfilingSession::new(&stats, &keys, None, None);

        assert_eq!(session.path(), None);
        assert_eq!(session.timestamp(), None);
        assert!(!session.uuid().is_empty());
        assert_eq!(*session.graph(), create_graph(&stats, &keys));
    }

    #[test]
    fn test_uuid_unique_per_construction() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();

        let first = ProfilingSession::new(&stats, &keys, None, None);
        let second = ProfilingSession::new(&stats, &keys, None, None);

        assert_ne!(first.uuid(), second.uuid());
    }

    #[test]
    fn test_path_from_environ() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();
        let environ: Environ = [("PATH_INFO".to_string(), "/x".to_string())].into();

        let session = ProfilingSession::new(&stats, &keys, Some(&environ), None);

        assert_eq!(session.path(), Some("/x"));
    }

    #[test]
    fn test_environ_without_path_info() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();
        let environ: Environ = [("REQUEST_METHOD".to_string(), "GET".to_string())].into();

        let session = ProfilingSession::new(&stats, &keys, Some(&environ), None);

        assert_eq!(session.path(), None);
    }

    #[test]
    fn test_timestamp_stored_verbatim() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();
        let captured = Utc::now();

        let session = ProfilingSession::new(&stats, &keys, None, Some(captured));

        assert_eq!(session.timestamp(), Some(captured));
    }

    #[test]
    fn test_summary_serializes_without_absent_fields() {
        let stats = sample_stats();
        let keys = KeyGenerator::unresolved();
        let session = ProfilingSession::new(&stats, &keys, None, None);

        let json = serde_json::to_value(session.summary()).unwrap();
        assert!(json.get("path").is_none());
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["node_count"], 2);
        assert_eq!(json["edge_count"], 1);
    }
}
