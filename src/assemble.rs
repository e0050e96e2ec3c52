//! Page assembly planning for `pdftk`.
//!
//! Inserting a single page into a PDF, or replacing one page of it, is done
//! with `pdftk A=<main> B=<insert> cat <ranges> output <result>`. This
//! module computes the range tokens. The planner is a pure function of the
//! page count, the target page, the [`Mode`] and the [`Side`].
//!
//! # Examples
//!
//! ```
//! use scanutils::assemble::{AssemblyPlan, Mode, Side};
//!
//! let plan = AssemblyPlan::new(Mode::Replace, Side::Before, 2, 5).unwrap();
//! assert_eq!(
//!     plan.cat_arguments("m.pdf", "i.pdf"),
//!     ["A=m.pdf", "B=i.pdf", "cat", "A1", "B1", "A3-end"]
//! );
//! ```

use std::fmt;

use crate::error::{Result, ScanError};
use crate::exec::ToolCommand;
use crate::path::FilePath;

/// Suffix of the assembled output file.
pub const JOINED_SUFFIX: &str = "_joined";

/// What happens to the page at the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Insert the new page; the main document keeps all its pages.
    Add,
    /// The new page takes the place of the target page.
    Replace,
}

/// Which side of the target page the new page goes to when adding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// In front of the target page.
    Before,
    /// Behind the target page.
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// One argument of the `pdftk cat` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Document A (the main PDF) as a whole; used for full prepend/append.
    MainDocument,
    /// Document B (the inserted page) as a whole.
    InsertDocument,
    /// The `cat` operation keyword.
    Cat,
    /// A single page of the main document: `A{n}`.
    MainPage(u32),
    /// A closed page range of the main document: `A{from}-{to}`.
    MainRange(u32, u32),
    /// The main document from a page to its end: `A{from}-end`.
    MainToEnd(u32),
    /// The single page of the inserted document: `B1`.
    InsertPage,
}

/// A computed page assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyPlan {
    mode: Mode,
    side: Side,
    page_number: u32,
    page_count: u32,
    tokens: Vec<Token>,
}

impl AssemblyPlan {
    /// Plan the insertion (or replacement) at `page_number` of a document
    /// with `page_count` pages. `side` is ignored for [`Mode::Replace`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PageOutOfRange`] unless
    /// `1 <= page_number <= page_count`.
    pub fn new(mode: Mode, side: Side, page_number: u32, page_count: u32) -> Result<Self> {
        if page_number == 0 || page_number > page_count {
            return Err(ScanError::PageOutOfRange {
                page_number,
                page_count,
            });
        }

        let side = match mode {
            Mode::Replace => Side::Before,
            Mode::Add => side,
        };

        Ok(Self {
            mode,
            side,
            page_number,
            page_count,
            tokens: plan_tokens(mode, side, page_number, page_count),
        })
    }

    /// The insertion mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The side; always [`Side::Before`] for replacements.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The target page number.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Pages in the main document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// The planned tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Render the tokens as `pdftk` arguments (everything between `pdftk`
    /// and `output`).
    pub fn cat_arguments(&self, main: &str, insert: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.tokens.len() + 2);

        if !self.is_whole_document_concatenation() {
            args.push(format!("A={main}"));
            args.push(format!("B={insert}"));
        }

        args.extend(self.tokens.iter().map(|token| match token {
            Token::MainDocument => main.to_string(),
            Token::InsertDocument => insert.to_string(),
            Token::Cat => "cat".to_string(),
            Token::MainPage(page) => format!("A{page}"),
            Token::MainRange(from, to) => format!("A{from}-{to}"),
            Token::MainToEnd(from) => format!("A{from}-end"),
            Token::InsertPage => "B1".to_string(),
        }));

        args
    }

    /// The full `pdftk ... output <result>` command.
    pub fn command(&self, main: &FilePath, insert: &FilePath, result: &FilePath) -> ToolCommand {
        ToolCommand::new("pdftk")
            .args(self.cat_arguments(main.path(), insert.path()))
            .args(["output", result.path()])
    }

    /// Expand the plan into the resulting page sequence.
    ///
    /// Each element names the source document (`'A'` or `'B'`) and the page
    /// within it; the inserted document is assumed to have one page.
    pub fn expand(&self) -> Vec<(char, u32)> {
        let mut pages = Vec::new();

        for token in &self.tokens {
            match token {
                Token::MainDocument => pages.extend((1..=self.page_count).map(|p| ('A', p))),
                Token::InsertDocument | Token::InsertPage => pages.push(('B', 1)),
                Token::Cat => {}
                Token::MainPage(page) => pages.push(('A', *page)),
                Token::MainRange(from, to) => pages.extend((*from..=*to).map(|p| ('A', p))),
                Token::MainToEnd(from) => {
                    pages.extend((*from..=self.page_count).map(|p| ('A', p)))
                }
            }
        }

        pages
    }

    fn is_whole_document_concatenation(&self) -> bool {
        matches!(
            self.tokens.first(),
            Some(Token::MainDocument) | Some(Token::InsertDocument)
        )
    }
}

fn plan_tokens(mode: Mode, side: Side, page_number: u32, page_count: u32) -> Vec<Token> {
    if mode == Mode::Add && page_number == 1 && side == Side::Before {
        return vec![Token::InsertDocument, Token::MainDocument, Token::Cat];
    }

    if mode == Mode::Add && page_number == page_count && side == Side::After {
        return vec![Token::MainDocument, Token::InsertDocument, Token::Cat];
    }

    // Last main page in front of the insert, first main page behind it.
    let insert_begin = match side {
        Side::Before => page_number - 1,
        Side::After => page_number,
    };
    let insert_end = match mode {
        Mode::Add => insert_begin + 1,
        Mode::Replace => insert_begin + 2,
    };

    let mut tokens = vec![Token::Cat];

    if insert_begin >= 1 {
        if insert_begin < 2 {
            tokens.push(Token::MainPage(1));
        } else {
            tokens.push(Token::MainRange(1, insert_begin));
        }
    }

    tokens.push(Token::InsertPage);

    if insert_end == page_count {
        tokens.push(Token::MainPage(insert_end));
    } else if insert_end < page_count {
        tokens.push(Token::MainToEnd(insert_end));
    }

    tokens
}

/// The output path of an assembly: `<main base>_joined.<ext>`.
pub fn joined_path(main: &FilePath) -> FilePath {
    main.with_append(JOINED_SUFFIX)
}
