mod util;

use labeled_digraph::prelude::*;
use std::io::Write;
use util::*;

#[test]
fn renders_exact_dot_text() {
    let (g, _) = graph_from(
        3,
        &["start", "mid", "end"],
        &[(0, 1, Some("go")), (1, 2, None), (0, 2, Some("skip"))],
        &[0],
    );
    let dot = DotRenderer::new().render_to_string(&g, "flow").unwrap();
    let expected = "\
digraph flow {
rankdir=\"LR\";
  n0 [label=\"start\"];
  n1 [label=\"mid\"];
  n2 [label=\"end\"];
  n0 -> n1 [label=\"go\"];
  n0 -> n2 [label=\"skip\"];
  n1 -> n2;
}
";
    assert_eq!(dot, expected);
}

#[test]
fn unreachable_nodes_are_not_rendered() {
    let (g, _) = graph_from(3, &[], &[(0, 1, None), (2, 0, None)], &[0]);
    let dot = DotRenderer::new().render_to_string(&g, "G").unwrap();
    assert!(dot.contains("  n0;\n  n1;\n"));
    assert!(!dot.contains("n2"));
    assert!(dot.contains("  n0 -> n1;\n"));
}

#[test]
fn renders_into_any_writer() {
    let (g, _) = graph_from(1, &["only"], &[], &[0]);
    let mut buf: Vec<u8> = Vec::new();
    writeln!(buf, "// header").unwrap();
    DotRenderer::new().render(&g, "one", &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("// header\ndigraph one {\n"));
    assert!(text.ends_with("  n0 [label=\"only\"];\n}\n"));
}

#[test]
fn custom_node_renderer_sees_payloads() {
    let mut g: Graph<&str, f32> = Graph::new();
    let a = g.new_node(Some("a"), 0.5);
    let b = g.create_node(None, 1.5);
    g.new_edge(a, b, None, ());
    let renderer = DotRenderer::<&str, f32>::new().with_node_renderer(|id, node, out| {
        writeln!(out, "  {id} [label=\"{:?}\", weight={}];", node.label(), node.payload())
    });
    let dot = renderer.render_to_string(&g, "G").unwrap();
    assert!(dot.contains("  n0 [label=\"Some(\"a\")\", weight=0.5];\n"));
    assert!(dot.contains("  n1 [label=\"None\", weight=1.5];\n"));
    assert!(dot.contains("  n0 -> n1;\n"));
}
