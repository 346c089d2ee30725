//! End-to-end scenarios over the stats → graph → session pipeline,
//! modeled on a cProfile-style capture of dynamically executed code.

use reqprof::graph::{create_graph, KeyGenerator, NodeKey};
use reqprof::render::to_dot;
use reqprof::session::{Environ, ProfilingSession};
use reqprof::stats::{
    read_stats, write_stats, CodeHandle, RawStatEntry, SymbolTableResolver, Timing,
};

fn timing(cumulative: f64, calls: u64) -> Timing {
    Timing {
        inline_time: cumulative / 2.0,
        cumulative_time: cumulative,
        primitive_calls: calls,
        total_calls: calls,
    }
}

/// Statistics as a profiler would report them for
/// `exec("test_func()")`: the built-in exec calls an anonymous
/// module block, which calls a module-resolvable function, and the
/// profiler's own disable method shows up as a root entry.
fn exec_capture() -> Vec<RawStatEntry> {
    let exec = CodeHandle::builtin("<built-in method builtins.exec>");
    let module_block = CodeHandle::file_scoped("<string>", "<module>");
    let test_func = CodeHandle::file_scoped("tests/test_graphs.py", "test_func");
    let disable = CodeHandle::builtin("<method 'disable' of '_lsprof.Profiler' objects>");

    vec![
        RawStatEntry::new(exec.clone(), timing(0.01, 1)),
        RawStatEntry::new(module_block.clone(), timing(0.009, 1)).with_caller(exec, timing(0.009, 1)),
        RawStatEntry::new(test_func, timing(0.001, 1)).with_caller(module_block, timing(0.001, 1)),
        RawStatEntry::new(disable, timing(0.0, 1)),
    ]
}

#[test]
fn test_create_graph_for_exec_capture() {
    let mut symbols = SymbolTableResolver::new();
    symbols.insert("tests/test_graphs.py", "tests.test_graphs");
    let keys = KeyGenerator::new(&symbols);

    let graph = create_graph(&exec_capture(), &keys);

    let mut nodes: Vec<&NodeKey> = graph.nodes().collect();
    nodes.sort();
    let nodes: Vec<&str> = nodes.iter().map(|k| k.as_str()).collect();

    assert_eq!(
        nodes,
        vec![
            "<built-in method builtins.exec>",
            "<method 'disable' of '_lsprof.Profiler' objects>",
            "<string>.<module>",
            "tests.test_graphs.test_func",
        ]
    );

    let mut edges: Vec<(String, String)> = graph
        .edges()
        .map(|(a, b, _)| (a.to_string(), b.to_string()))
        .collect();
    edges.sort();

    assert_eq!(
        edges,
        vec![
            (
                "<built-in method builtins.exec>".to_string(),
                "<string>.<module>".to_string()
            ),
            (
                "<string>.<module>".to_string(),
                "tests.test_graphs.test_func".to_string()
            ),
        ]
    );
}

#[test]
fn test_unresolved_capture_falls_back_to_file_keys() {
    let keys = KeyGenerator::unresolved();
    let graph = create_graph(&exec_capture(), &keys);

    assert!(graph.contains_node(&NodeKey::from("tests/test_graphs.py.test_func")));
    assert!(!graph.contains_node(&NodeKey::from("tests.test_graphs.test_func")));
}

#[test]
fn test_session_over_full_capture() {
    let stats = exec_capture();
    let keys = KeyGenerator::unresolved();
    let environ: Environ = [("PATH_INFO".to_string(), "/some/path".to_string())].into();

    let session = ProfilingSession::new(&stats, &keys, Some(&environ), None);

    assert_eq!(session.path(), Some("/some/path"));
    assert_eq!(session.timestamp(), None);
    assert_eq!(*session.graph(), create_graph(&stats, &keys));

    // The stats snapshot is untouched by session construction.
    assert_eq!(stats, exec_capture());
}

#[test]
fn test_stats_round_trip_preserves_graph() {
    let stats = exec_capture();
    let temp_file = tempfile::NamedTempFile::new().unwrap();

    write_stats(&stats, temp_file.path()).unwrap();
    let loaded = read_stats(temp_file.path()).unwrap();

    let keys = KeyGenerator::unresolved();
    assert_eq!(create_graph(&stats, &keys), create_graph(&loaded, &keys));
}

#[test]
fn test_dot_output_covers_whole_graph() {
    let keys = KeyGenerator::unresolved();
    let graph = create_graph(&exec_capture(), &keys);

    let dot = to_dot(&graph);

    for node in graph.nodes() {
        // Quotes inside builtin markers are escaped in DOT output.
        let escaped = node.as_str().replace('\\', "\\\\").replace('"', "\\\"");
        assert!(dot.contains(&escaped), "missing node {node}");
    }
    assert!(dot.contains("->"));
}
