//! Graph file readers

use anyhow::{anyhow, bail, Context, Result};
use crate::graph::{CompressedGraph, GraphBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Read a graph, choosing the parser from the file extension.
///
/// `.graph` files are METIS adjacency lists, `.txt` files are edge lists and
/// `.gml` files are GML documents.
pub fn read_graph_file(path: &Path) -> Result<CompressedGraph> {
    log::info!("Reading graph file: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let graph = match path.extension().and_then(|ext| ext.to_str()) {
        Some("graph") => parse_metis(&text),
        Some("txt") => parse_edge_list(&text),
        Some("gml") => parse_gml(&text),
        other => bail!("Unsupported graph format {:?} for {}", other, path.display()),
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    Ok(graph)
}

/// Parse a METIS adjacency file: a header `n [m ...]` followed by one line of
/// 1-based neighbor ids per vertex. Lines starting with `%` are comments.
pub fn parse_metis(text: &str) -> Result<CompressedGraph> {
    let mut lines = text.lines().filter(|line| !line.trim_start().starts_with('%'));

    let header = lines.next().ok_or_else(|| anyhow!("missing header line"))?;
    let node_count: usize = header
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow!("empty header line"))?
        .parse()
        .context("node count in header")?;

    let mut builder = GraphBuilder::with_nodes(node_count);
    for (vertex, line) in lines.take(node_count).enumerate() {
        for token in line.split_whitespace() {
            let neighbor: usize = token
                .parse()
                .with_context(|| format!("neighbor {:?} of vertex {}", token, vertex + 1))?;
            if neighbor == 0 || neighbor > node_count {
                bail!("neighbor {} of vertex {} is out of range", neighbor, vertex + 1);
            }
            builder.add_edge(vertex as u32, (neighbor - 1) as u32)?;
        }
    }

    Ok(builder.build())
}

/// Parse an edge list: a header `n m` followed by `m` lines `u v`.
///
/// Vertex labels are arbitrary tokens, relabelled to `0..` in first-seen order.
pub fn parse_edge_list(text: &str) -> Result<CompressedGraph> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or_else(|| anyhow!("missing header line"))?;
    let mut fields = header.split_whitespace();
    let node_hint: usize = fields
        .next()
        .ok_or_else(|| anyhow!("empty header line"))?
        .parse()
        .context("node count in header")?;
    let edge_count: usize = fields
        .next()
        .ok_or_else(|| anyhow!("header lacks an edge count"))?
        .parse()
        .context("edge count in header")?;

    let mut builder = GraphBuilder::with_capacity(node_hint);
    for (index, line) in lines.take(edge_count).enumerate() {
        let mut ends = line.split_whitespace();
        match (ends.next(), ends.next()) {
            (Some(u), Some(v)) => builder.add_labeled_edge(u, v),
            _ => bail!("edge line {} is malformed: {:?}", index + 2, line),
        }
    }

    Ok(builder.build())
}

#[derive(Debug, Clone, PartialEq)]
enum GmlToken {
    Open,
    Close,
    Word(String),
}

#[derive(Debug, Clone, PartialEq)]
enum GmlValue {
    Scalar(String),
    List(Vec<(String, GmlValue)>),
}

impl GmlValue {
    fn list(&self) -> Option<&[(String, GmlValue)]> {
        match self {
            GmlValue::List(entries) => Some(entries.as_slice()),
            GmlValue::Scalar(_) => None,
        }
    }
}

fn scalar<'a>(entries: &'a [(String, GmlValue)], key: &str) -> Option<&'a str> {
    entries.iter().find_map(|(k, value)| match value {
        GmlValue::Scalar(text) if k == key => Some(text.as_str()),
        _ => None,
    })
}

fn tokenize_gml(text: &str) -> Result<Vec<GmlToken>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next().map_or(false, |c| c != '\n') {}
            }
            '[' => {
                chars.next();
                tokens.push(GmlToken::Open);
            }
            ']' => {
                chars.next();
                tokens.push(GmlToken::Close);
            }
            '"' => {
                chars.next();
                let mut word = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => word.push(c),
                        None => bail!("unterminated string"),
                    }
                }
                tokens.push(GmlToken::Word(word));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '[' || c == ']' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(GmlToken::Word(word));
            }
        }
    }
    Ok(tokens)
}

fn parse_gml_list<I>(tokens: &mut I, nested: bool) -> Result<Vec<(String, GmlValue)>>
where
    I: Iterator<Item = GmlToken>,
{
    let mut entries = Vec::new();
    loop {
        let key = match tokens.next() {
            Some(GmlToken::Word(key)) => key,
            Some(GmlToken::Close) if nested => return Ok(entries),
            None if !nested => return Ok(entries),
            Some(GmlToken::Close) => bail!("unbalanced ']'"),
            Some(GmlToken::Open) => bail!("'[' without a key"),
            None => bail!("missing ']'"),
        };
        let value = match tokens.next() {
            Some(GmlToken::Word(text)) => GmlValue::Scalar(text),
            Some(GmlToken::Open) => GmlValue::List(parse_gml_list(tokens, true)?),
            _ => bail!("key {:?} has no value", key),
        };
        entries.push((key, value));
    }
}

/// Parse a GML document.
///
/// Vertices are named by their `id` and numbered `0..` in declaration order.
/// Directed and multi-edge documents collapse to a simple undirected graph.
pub fn parse_gml(text: &str) -> Result<CompressedGraph> {
    let document = parse_gml_list(&mut tokenize_gml(text)?.into_iter(), false)?;
    let graph = document
        .iter()
        .find(|(key, _)| key == "graph")
        .and_then(|(_, value)| value.list())
        .ok_or_else(|| anyhow!("no graph block"))?;

    let mut builder = GraphBuilder::with_capacity(graph.len());
    let mut declared: HashSet<&str> = HashSet::new();
    for (index, (key, value)) in graph.iter().enumerate() {
        if key != "node" {
            continue;
        }
        let node = value.list().ok_or_else(|| anyhow!("node entry {} is not a block", index))?;
        let id = scalar(node, "id").ok_or_else(|| anyhow!("node entry {} has no id", index))?;
        if !declared.insert(id) {
            bail!("node id {} is declared twice", id);
        }
        builder.get_or_create_node(id);
    }

    for (index, (key, value)) in graph.iter().enumerate() {
        if key != "edge" {
            continue;
        }
        let edge = value.list().ok_or_else(|| anyhow!("edge entry {} is not a block", index))?;
        let (source, target) = match (scalar(edge, "source"), scalar(edge, "target")) {
            (Some(source), Some(target)) => (source, target),
            _ => bail!("edge entry {} lacks a source or target", index),
        };
        for end in [source, target] {
            if !declared.contains(end) {
                bail!("edge entry {} names undeclared node {}", index, end);
            }
        }
        builder.add_labeled_edge(source, target);
    }

    Ok(builder.build())
}
