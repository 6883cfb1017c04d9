//! Interactive menu session over a `Tree<String>`.
//!
//! Reads whitespace-delimited tokens, dispatches on [`MenuChoice`] and writes
//! line-oriented text. Lookups by value go through [`Tree::find_node`] from the
//! root, so the first match in pre-order wins.

use std::io::{self, BufRead, Write};

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::application::MenuChoice;
use crate::cli::error::{CliError, CliResult};
use crate::cli::input::TokenReader;
use crate::cli::output;
use crate::config::DisplayStyle;
use crate::domain::{NodeId, Tree, TreeConvert, TreeError};

/// Whether the menu loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct MenuSession<R, W> {
    tree: Tree<String>,
    input: TokenReader<R>,
    out: W,
    style: DisplayStyle,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(tree: Tree<String>, input: R, out: W, style: DisplayStyle) -> Self {
        Self {
            tree,
            input: TokenReader::new(input),
            out,
            style,
        }
    }

    pub fn into_parts(self) -> (Tree<String>, W) {
        (self.tree, self.out)
    }

    /// Runs the menu until the Exit choice or end of input.
    ///
    /// Failed tree operations are reported and the loop continues; only
    /// terminal I/O errors end the session with an error.
    pub fn run(&mut self) -> CliResult<()> {
        loop {
            self.print_menu()?;
            let Some(token) = self.next_token()? else {
                debug!("End of input, leaving menu");
                return Ok(());
            };
            let flow = match token.parse::<MenuChoice>() {
                Ok(choice) => self.execute(choice),
                Err(e) => {
                    debug!("{}", e);
                    self.notice("Invalid option. Please try again.")?;
                    continue;
                }
            };
            match flow {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(CliError::Application(e)) => {
                    warn!("{}", e);
                    self.write(|out| output::error(out, &e))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, choice: MenuChoice) -> CliResult<Flow> {
        match choice {
            MenuChoice::AddChild => self.add_child(),
            MenuChoice::Display => self.display(),
            MenuChoice::FindSiblings => self.find_siblings(),
            MenuChoice::ListLeaves => self.list_leaves(),
            MenuChoice::ListInternalNodes => self.list_internal_nodes(),
            MenuChoice::ListEdges => self.list_edges(),
            MenuChoice::FindDepth => self.find_depth(),
            MenuChoice::FindHeight => self.find_height(),
            MenuChoice::FindSubtree => self.find_subtree(),
            MenuChoice::Exit => {
                self.say("Exiting program.")?;
                Ok(Flow::Exit)
            }
            MenuChoice::FindPath => self.find_path(),
            MenuChoice::FindParent => self.find_parent(),
            MenuChoice::ResetRoot => self.reset_root(),
        }
    }

    fn add_child(&mut self) -> CliResult<Flow> {
        let Some(parent_value) = self.ask("Enter parent node data:")? else {
            return Ok(Flow::Exit);
        };
        let Some(child_value) = self.ask("Enter child node data:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&parent_value)? {
            Some(parent) => match self.tree.add_child(parent, child_value) {
                Ok(_) => self.write(|out| output::success(out, "Child node added successfully."))?,
                Err(e) => {
                    warn!("{}", e);
                    self.write(|out| output::error(out, &e))?;
                }
            },
            None => self.notice("Parent node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn display(&mut self) -> CliResult<Flow> {
        self.write(|out| output::header(out, "Tree structure:"))?;
        self.say("Enter the number of levels to be displayed.")?;
        let Some(token) = self.next_token()? else {
            return Ok(Flow::Exit);
        };
        let Ok(level) = token.parse::<usize>() else {
            self.notice(&format!("Invalid level '{}'.", token))?;
            return Ok(Flow::Continue);
        };
        let rendered = render(self.style, &self.tree, self.tree.root(), level)?;
        self.write(|out| output::raw(out, &rendered))?;
        Ok(Flow::Continue)
    }

    fn find_siblings(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter node data to find its siblings:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&value)? {
            Some(node) => {
                let siblings = self.tree.find_siblings(node);
                if siblings.is_empty() {
                    self.say("No siblings.")?;
                } else {
                    let names = self.values(&siblings);
                    self.say(&format!("Siblings of '{}': {}", value, names))?;
                }
            }
            None => self.notice("Node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn list_leaves(&mut self) -> CliResult<Flow> {
        let leaves = self.tree.list_leaves(self.tree.root())?;
        let names = self.values(&leaves);
        self.say(&format!("Leaves of the tree: {}", names))?;
        Ok(Flow::Continue)
    }

    fn list_internal_nodes(&mut self) -> CliResult<Flow> {
        let internal = self.tree.list_internal_nodes(self.tree.root())?;
        if internal.is_empty() {
            self.say("No internal nodes found.")?;
        } else {
            let names = self.values(&internal);
            self.say(&format!("Internal nodes of the tree: {}", names))?;
        }
        Ok(Flow::Continue)
    }

    fn list_edges(&mut self) -> CliResult<Flow> {
        let edges = self.tree.list_edges();
        self.write(|out| output::header(out, "Edges of the tree:"))?;
        for edge in &edges {
            self.say(edge)?;
        }
        Ok(Flow::Continue)
    }

    fn find_depth(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter node data to find its depth:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&value)? {
            Some(node) => {
                let depth = self.tree.find_depth(node);
                self.say(&format!("Depth of '{}': {}", value, depth))?;
            }
            None => self.notice("Node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn find_height(&mut self) -> CliResult<Flow> {
        let height = self.tree.find_height(self.tree.root());
        self.say(&format!("Height of the tree: {}", height))?;
        Ok(Flow::Continue)
    }

    fn find_subtree(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter node data to find its subtree:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&value)? {
            Some(node) => {
                let subtree = self.tree.find_subtree(node)?;
                let rendered = render(self.style, &subtree, subtree.root(), 0)?;
                self.say(&format!("Subtree rooted at '{}':", value))?;
                self.write(|out| output::raw(out, &rendered))?;
            }
            None => self.notice("Node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn find_path(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter node data to find its path:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&value)? {
            Some(node) => {
                let path = self.tree.find_path(node).iter().join(" -> ");
                self.say(&format!("Path to '{}': {}", value, path))?;
            }
            None => self.notice("Node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn find_parent(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter node data to find its parent:")? else {
            return Ok(Flow::Exit);
        };
        match self.lookup(&value)? {
            Some(node) => {
                let parent = self
                    .tree
                    .find_parent(node)
                    .and_then(|p| self.tree.value(p))
                    .cloned();
                match parent {
                    Some(parent) => self.say(&format!("Parent of '{}': {}", value, parent))?,
                    None => self.say(&format!("'{}' has no parent.", value))?,
                }
            }
            None => self.notice("Node not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn reset_root(&mut self) -> CliResult<Flow> {
        let Some(value) = self.ask("Enter new root node data:")? else {
            return Ok(Flow::Exit);
        };
        let message = format!("Root reset to '{}'.", value);
        self.tree.reset_root(value);
        self.write(|out| output::success(out, &message))?;
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> CliResult<()> {
        self.say("")?;
        self.write(|out| output::header(out, "Menu:"))?;
        for choice in MenuChoice::ALL {
            self.say(&choice)?;
        }
        self.write(|out| output::prompt(out, "Enter your choice:"))
    }

    fn lookup(&self, value: &str) -> CliResult<Option<NodeId>> {
        Ok(self.tree.find_node(self.tree.root(), &value.to_string())?)
    }

    fn values(&self, nodes: &[NodeId]) -> String {
        nodes
            .iter()
            .filter_map(|&node| self.tree.value(node))
            .join(" ")
    }

    fn ask(&mut self, prompt: &str) -> CliResult<Option<String>> {
        self.write(|out| output::prompt(out, prompt))?;
        self.next_token()
    }

    fn next_token(&mut self) -> CliResult<Option<String>> {
        self.input
            .next_token()
            .map_err(|e| CliError::io("read input", e))
    }

    fn say(&mut self, msg: &(impl std::fmt::Display + ?Sized)) -> CliResult<()> {
        self.write(|out| output::info(out, msg))
    }

    fn notice(&mut self, msg: &str) -> CliResult<()> {
        self.write(|out| output::warning(out, msg))
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) -> CliResult<()> {
        f(&mut self.out).map_err(|e| CliError::io("write output", e))
    }
}

/// Renders the subtree at `node` in the configured style, shifted right by `level`.
fn render(style: DisplayStyle, tree: &Tree<String>, node: NodeId, level: usize) -> CliResult<String> {
    match style {
        DisplayStyle::Indent => Ok(tree.display(node, level)?),
        DisplayStyle::Pretty => {
            if !tree.contains(node) {
                return Err(TreeError::InvalidNode(node).into());
            }
            Ok((tree, node)
                .to_tree_string()
                .to_string()
                .lines()
                .map(|line| format!("{}{}\n", " ".repeat(level), line))
                .collect())
        }
    }
}
