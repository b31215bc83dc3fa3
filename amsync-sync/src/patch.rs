//! In-place patching of generated manifest blocks.
//!
//! The patch is a pure fold over the manifest lines with four states:
//!
//! | State    | keyword line `K`        | blank line                      | other line |
//! |----------|-------------------------|---------------------------------|------------|
//! | Outside  | → In(K), drop line      | copy                            | copy       |
//! | In(K)    | K: stay, other: → Both  | emit `K = …`, blank → Outside   | drop       |
//! | Both     | stay, drop line         | emit SOURCES, RESOURCES, blank  | drop       |
//!
//! Ending the scan anywhere but `Outside` is an [`UnterminatedBlock`].

use std::fmt;

use amsync_core::{normalize::render_list, BlockKeyword, ProjectDescriptor};

/// Replacement text for each generated block (without the `KEYWORD = ` prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBlocks {
    pub sources: String,
    pub resources: String,
}

impl GeneratedBlocks {
    /// Render both blocks from a normalized descriptor.
    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        Self {
            sources: render_list(descriptor.entries(BlockKeyword::Sources)),
            resources: render_list(descriptor.entries(BlockKeyword::Resources)),
        }
    }

    /// Full replacement line (possibly spanning continuation lines) for `keyword`.
    pub fn line(&self, keyword: BlockKeyword) -> String {
        let block = match keyword {
            BlockKeyword::Sources => &self.sources,
            BlockKeyword::Resources => &self.resources,
        };
        format!("{keyword} = {block}")
    }
}

/// A block keyword line with no blank-line terminator before end of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedBlock {
    pub keyword: BlockKeyword,
    /// 1-based line number of the keyword line.
    pub line: usize,
}

impl fmt::Display for UnterminatedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} block opened at line {} is not terminated by a blank line",
            self.keyword, self.line
        )
    }
}

impl std::error::Error for UnterminatedBlock {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    In(BlockKeyword, usize),
    Both(BlockKeyword, usize),
}

impl State {
    fn open(self, keyword: BlockKeyword, line: usize) -> State {
        match self {
            State::Outside => State::In(keyword, line),
            State::In(open, at) if open == keyword => State::In(open, at),
            State::In(open, at) | State::Both(open, at) => State::Both(open, at),
        }
    }

    fn unterminated(self) -> Option<UnterminatedBlock> {
        match self {
            State::Outside => None,
            State::In(keyword, line) | State::Both(keyword, line) => {
                Some(UnterminatedBlock { keyword, line })
            }
        }
    }
}

fn keyword_of(line: &str) -> Option<BlockKeyword> {
    BlockKeyword::all().iter().copied().find(|k| k.opens(line))
}

// ---------------------------------------------------------------------------
// Line splitting
// ---------------------------------------------------------------------------

/// Manifest text split into lines, remembering whether it ended with `\n`.
struct Lines<'a> {
    lines: Vec<&'a str>,
    trailing_newline: bool,
}

impl<'a> Lines<'a> {
    fn split(text: &'a str) -> Self {
        if text.is_empty() {
            return Lines {
                lines: Vec::new(),
                trailing_newline: false,
            };
        }
        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };
        Lines {
            lines: body.split('\n').collect(),
            trailing_newline,
        }
    }

    fn join(out: Vec<String>, trailing_newline: bool) -> String {
        let mut text = out.join("\n");
        if trailing_newline && !out.is_empty() {
            text.push('\n');
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Replace the generated blocks of an existing manifest.
///
/// `existing` must use LF line endings. Lines outside generated blocks are
/// copied verbatim; keyword lines and stale block bodies are dropped and the
/// fresh block is emitted at the terminating blank line.
pub fn patch_manifest(
    existing: &str,
    blocks: &GeneratedBlocks,
) -> Result<String, UnterminatedBlock> {
    let Lines {
        lines,
        trailing_newline,
    } = Lines::split(existing);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let end = lines
        .iter()
        .enumerate()
        .fold(State::Outside, |state, (idx, line)| {
            step(state, idx + 1, line, blocks, &mut out)
        });

    match end.unterminated() {
        Some(err) => Err(err),
        None => Ok(Lines::join(out, trailing_newline)),
    }
}

fn step(
    state: State,
    line_no: usize,
    line: &str,
    blocks: &GeneratedBlocks,
    out: &mut Vec<String>,
) -> State {
    if let Some(keyword) = keyword_of(line) {
        return state.open(keyword, line_no);
    }

    if line.is_empty() {
        match state {
            State::Outside => {}
            State::In(keyword, _) => out.push(blocks.line(keyword)),
            State::Both(..) => {
                for keyword in BlockKeyword::all() {
                    out.push(blocks.line(*keyword));
                }
            }
        }
        out.push(String::new());
        return State::Outside;
    }

    if state == State::Outside {
        out.push(line.to_string());
    }
    state
}

/// Current text of each terminated generated block, keyword line included.
///
/// Every keyword line starts a new entry, so two blocks opened back to back
/// before a single terminator are reported separately.
pub fn current_blocks(existing: &str) -> Result<Vec<(BlockKeyword, String)>, UnterminatedBlock> {
    let Lines { lines, .. } = Lines::split(existing);

    let mut found = Vec::new();
    let mut open: Option<(BlockKeyword, Vec<&str>)> = None;
    let mut state = State::Outside;
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(keyword) = keyword_of(line) {
            state = state.open(keyword, idx + 1);
            if let Some((previous, body)) = open.replace((keyword, vec![line])) {
                found.push((previous, body.join("\n")));
            }
            continue;
        }
        let Some((keyword, body)) = open.as_mut() else {
            continue;
        };
        if line.is_empty() {
            found.push((*keyword, body.join("\n")));
            open = None;
            state = State::Outside;
        } else {
            body.push(line);
        }
    }

    match state.unterminated() {
        Some(err) => Err(err),
        None => Ok(found),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
