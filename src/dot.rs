use allocator_api2::alloc::Allocator;
use std::{
    collections::HashMap,
    fmt::Display,
    path::PathBuf
};
use crate::{
    error::TraceError,
    rb::{
        compare::{ TreeCompare, TreeDestroy },
        node::Node,
        tree::Tree
    }
};

static GRAPHVIZ_ONLINE: &str = "https://dreampuf.github.io/GraphvizOnline/#";

#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Draw a dotted edge from every node back to its parent.
    pub draw_parents: bool,
    /// Prefix each node label with the node's address.
    pub include_addresses: bool,
    /// Log a GraphvizOnline link to the graph so far after every step.
    pub print_link_every_step: bool,
    /// When set, `finish` also writes `<output_dir>/<message>.dot`. Path
    /// separators in the message are replaced with `_`, so the file always
    /// lands directly inside `output_dir`.
    pub output_dir: Option<PathBuf>
}

impl Default for DotConfig {
    fn default() -> Self {
        Self { draw_parents: true, include_addresses: false, print_link_every_step: true, output_dir: None }
    }
}

/// Records snapshots of a tree as Graphviz subgraphs, one per step, and joins
/// them into a single `digraph` on [`DotTracer::finish`].
///
/// The tracer only reads the tree. `F` turns a record into the text shown in
/// its node; it should give distinct text for distinct records, since node
/// identifiers in the output are derived from it.
pub struct DotTracer<F> {
    config: DotConfig,
    formatter: F,
    buffer: String,
    call_counter: usize,
    steps: Vec<String>,
    // node address -> (tag, snapshots left to show it in)
    tags: HashMap<*const (), (String, usize)>
}

impl<F> DotTracer<F> {
    pub fn new(formatter: F) -> Self { Self::with_config(formatter, DotConfig::default()) }
    pub fn with_config(formatter: F, config: DotConfig) -> Self {
        Self {
            config,
            formatter,
            buffer: String::from("digraph {\n"),
            call_counter: 0,
            steps: vec![],
            tags: HashMap::new()
        }
    }
    pub fn config(&self) -> &DotConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut DotConfig { &mut self.config }
    /// Names of the steps recorded since the last `finish`.
    pub fn steps(&self) -> &[String] { &self.steps }

    /// Snapshot the whole tree. An empty tree has nothing to draw and is rejected.
    pub fn add_step<T, C, D, A>(&mut self, tree: &Tree<T, C, D, A>, step_name: &str) -> Result<(), TraceError>
    where F: Fn(&T) -> String,
          C: TreeCompare<T>,
          D: TreeDestroy<T>,
          A: Allocator
    {
        match tree.root() {
            Some(root) => {
                self.add_node_step(root, step_name);
                Ok(())
            },
            None => Err(TraceError::EmptyTree)
        }
    }

    /// Snapshot the subtree below `node`.
    pub fn add_node_step<T>(&mut self, node: &Node<T>, step_name: &str)
    where F: Fn(&T) -> String
    {
        self.tree_to_dot(node, step_name);
        if self.config.print_link_every_step {
            let link = graphviz_online_link(&format!("{}}}", self.buffer));
            log::info!("step \"{}\" {}", step_name, link);
        }
        self.steps.push(step_name.to_string());
        // tags fade out one snapshot at a time
        self.tags.retain(|_, (_, left)| {
            *left = left.saturating_sub(1);
            *left > 0
        });
    }

    /// Show `tag` next to `node` in the next `steps` snapshots.
    pub fn tag_node<T>(&mut self, node: &Node<T>, tag: &str, steps: usize) {
        self.tags.insert(node.addr(), (tag.to_string(), steps));
    }

    /// Close the graph and return it. The tracer is reset and can record a new graph.
    pub fn finish(&mut self, message: &str) -> Result<String, TraceError> {
        self.buffer.push_str(&format!("label = \"{}\";}}\n", escape_quoted(message)));
        log::info!("{}, link: {}", message, graphviz_online_link(&self.buffer));
        let dot = std::mem::replace(&mut self.buffer, String::from("digraph {\n"));
        self.call_counter = 0;
        self.steps.clear();
        self.tags.clear();
        if let Some(dir) = &self.config.output_dir {
            let path = dir.join(format!("{}.dot", file_stem(message)));
            std::fs::write(&path, &dot)?;
            log::debug!("wrote {}", path.display());
        }
        Ok(dot)
    }

    fn node_def<T>(&self, node: &Node<T>) -> String
    where F: Fn(&T) -> String
    {
        let color = if node.is_red() { "red" } else { "black" };
        let mut label = String::from("{");
        if self.config.include_addresses {
            label.push_str(&format!("{:p} | ", node.addr()));
        }
        label.push_str(&escape_record((self.formatter)(node.data())));
        if let Some((tag, _)) = self.tags.get(&node.addr()).filter(|(_, left)| *left > 0) {
            label.push_str(" | ");
            label.push_str(tag);
        }
        label.push('}');
        format!("[shape=record color={} label=\"{}\"];", color, label)
    }

    fn tree_to_dot<T>(&mut self, root: &Node<T>, label: &str)
    where F: Fn(&T) -> String
    {
        self.call_counter += 1;
        let subgraph = format!("cluster_{}_count_{}", escape_quoted(label), self.call_counter);
        let name = |node: &Node<T>, extra: &str| {
            format!("\"{}_data_{}{}\"", subgraph, escape_quoted(&(self.formatter)(node.data())), extra)
        };
        let mut nodes = String::new();
        let mut edges = String::new();
        // preorder, left subtree first
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let this = name(node, "");
            nodes.push_str(&format!("{}{}\n", this, self.node_def(node)));
            // the parent of the starting node is not part of this drawing
            if self.config.draw_parents && !std::ptr::eq(node, root) {
                if let Some(parent) = node.parent() {
                    edges.push_str(&format!("{} -> {}[style=dotted];\n", this, name(parent, "")));
                }
            }
            for (child, side, null) in [(node.left(), "L", "_leftNull"), (node.right(), "R", "_rightNull")] {
                match child {
                    Some(child) => edges.push_str(&format!("{} -> {}[label={}];\n", this, name(child, ""), side)),
                    None => {
                        let nil = name(node, null);
                        nodes.push_str(&format!("{} [label=Null shape=point color=black];\n", nil));
                        edges.push_str(&format!("{} -> {}[label={}];\n", this, nil, side));
                    }
                }
            }
            if let Some(right) = node.right() { stack.push(right) }
            if let Some(left) = node.left() { stack.push(left) }
        }
        self.buffer.push_str(&format!("subgraph \"{}\"{{\nlabel =\"{}\";\n{}\n{}\n}}\n", subgraph, escape_quoted(label), nodes, edges));
    }
}

// text placed between double quotes
fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

// record text inside a `shape=record` label, where braces, bars and angle
// brackets are field syntax
fn escape_record(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '{' | '}' | '|' | '<' | '>' => { escaped.push('\\'); escaped.push(c) },
            _ => escaped.push(c)
        }
    }
    escaped
}

fn file_stem(message: &str) -> String {
    message.chars().map(|c| if std::path::is_separator(c) { '_' } else { c }).collect()
}

/// Formatter for any record with a `Display` impl.
pub fn display_formatter<T: Display>(record: &T) -> String { record.to_string() }

/// Link that opens `dot` in the GraphvizOnline viewer.
pub fn graphviz_online_link(dot: &str) -> String {
    format!("{}{}", GRAPHVIZ_ONLINE, url_encode(dot))
}

fn url_encode(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => escaped.push(b as char),
            _ => escaped.push_str(&format!("%{:02X}", b))
        }
    }
    escaped
}
