//! Graphviz DOT export of the visible graph.

use std::fmt::Write;

use super::view::DerivedView;

/// Output knobs for [`to_dot`].
#[derive(Clone, Debug, Default)]
pub struct DotOptions {
	/// Wrap nodes sharing a group in `subgraph cluster_N` blocks.
	pub cluster_groups: bool,
}

fn quote(id: &str) -> String {
	format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

type Clusters<'a> = Vec<(&'a str, Vec<&'a str>)>;

/// Splits visible node ids by group, groups in first-seen order.
fn clusters(view: &DerivedView) -> (Clusters<'_>, Vec<&str>) {
	let mut grouped: Clusters<'_> = Vec::new();
	let mut ungrouped = Vec::new();
	for node in &view.nodes {
		let id = node.id.as_str();
		match node.group.as_deref() {
			None => ungrouped.push(id),
			Some(group) => match grouped.iter_mut().find(|(g, _)| *g == group) {
				Some((_, members)) => members.push(id),
				None => grouped.push((group, vec![id])),
			},
		}
	}
	(grouped, ungrouped)
}

/// Renders `view` as a `digraph`. Node and edge order follow the view.
pub fn to_dot(view: &DerivedView, options: &DotOptions) -> String {
	let mut out = String::from("digraph dependencies {\n\tnode [style=filled];\n");

	if options.cluster_groups {
		let (grouped, ungrouped) = clusters(view);
		for (n, (group, members)) in grouped.iter().enumerate() {
			let _ = writeln!(out, "\tsubgraph cluster_{n} {{");
			let _ = writeln!(out, "\t\tlabel = {};", quote(group));
			for id in members {
				let _ = writeln!(out, "\t\t{};", quote(id));
			}
			out.push_str("\t}\n");
		}
		for id in ungrouped {
			let _ = writeln!(out, "\t{};", quote(id));
		}
	} else {
		for node in &view.nodes {
			let _ = writeln!(out, "\t{};", quote(&node.id));
		}
	}

	for link in &view.links {
		let _ = writeln!(out, "\t{} -> {};", quote(&link.source), quote(&link.target));
	}

	out.push_str("}\n");
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::config::LoaderConfig;
	use crate::graph::loader::load_graph;

	fn view_of(text: &str) -> DerivedView {
		DerivedView::build(&load_graph(text, &LoaderConfig::default()).unwrap())
	}

	#[test]
	fn plain_export_lists_nodes_then_edges() {
		let dot = to_dot(&view_of(r#"{"a": ["b"]}"#), &DotOptions::default());
		assert_eq!(
			dot,
			"digraph dependencies {\n\tnode [style=filled];\n\t\"a\";\n\t\"b\";\n\t\"a\" -> \"b\";\n}\n"
		);
	}

	#[test]
	fn hidden_nodes_are_not_exported() {
		let mut g = load_graph(r#"{"a": ["b", "c"]}"#, &LoaderConfig::default()).unwrap();
		g.set_hidden("c", true);
		let dot = to_dot(&DerivedView::build(&g), &DotOptions::default());
		assert!(!dot.contains("\"c\""));
		assert!(dot.contains("\"a\" -> \"b\";"));
	}

	#[test]
	fn quotes_are_escaped() {
		assert_eq!(quote(r#"we"ird\name"#), r#""we\"ird\\name""#);
	}

	#[test]
	fn groups_become_clusters() {
		let view = view_of(
			r#"{
				"orders": {"name_with_namespace": "acme / billing / orders", "dependencies": ["lib"]},
				"invoices": {"name_with_namespace": "acme / billing / invoices", "dependencies": []},
				"users": {"name_with_namespace": "acme / identity / users", "dependencies": []}
			}"#,
		);
		let dot = to_dot(&view, &DotOptions { cluster_groups: true });
		let expected = "digraph dependencies {
	node [style=filled];
	subgraph cluster_0 {
		label = \"billing\";
		\"orders\";
		\"invoices\";
	}
	subgraph cluster_1 {
		label = \"identity\";
		\"users\";
	}
	\"lib\";
	\"orders\" -> \"lib\";
}
";
		assert_eq!(dot, expected);
	}
}
