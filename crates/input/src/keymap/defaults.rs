//! Default binding tables.
//!
//! Each mode lists its tables in precedence order; a key bound by an
//! earlier table shadows the same key in later ones.

use vix_primitives::Mode;

type Table = &'static [(&'static str, &'static str)];

const BASIC: Table = &[
	("<Down>", "<vis-motion-line-down>"),
	("<End>", "<vis-motion-line-end>"),
	("<Home>", "<vis-motion-line-begin>"),
	("<Left>", "<vis-motion-char-prev>"),
	("<Right>", "<vis-motion-char-next>"),
	("<S-Left>", "<vis-motion-bigword-start-prev>"),
	("<S-Right>", "<vis-motion-bigword-start-next>"),
	("<Up>", "<vis-motion-line-up>"),
];

const MOTIONS: Table = &[
	("$", "<vis-motion-line-end>"),
	("^", "<vis-motion-line-start>"),
	(";", "<vis-motion-totill-repeat>"),
	(",", "<vis-motion-totill-reverse>"),
	("+", "j^"),
	("-", "k^"),
	("B", "<vis-motion-bigword-start-prev>"),
	("b", "<vis-motion-word-start-prev>"),
	("E", "<vis-motion-bigword-end-next>"),
	("e", "<vis-motion-word-end-next>"),
	("F", "<vis-motion-to-line-left>"),
	("f", "<vis-motion-to-line-right>"),
	("gh", "<vis-motion-codepoint-prev>"),
	("gl", "<vis-motion-codepoint-next>"),
	("g_", "<vis-motion-line-finish>"),
	("G", "<vis-motion-line-last>"),
	("gE", "<vis-motion-bigword-end-prev>"),
	("ge", "<vis-motion-word-end-prev>"),
	("gg", "<vis-motion-line-first>"),
	("h", "<vis-motion-char-prev>"),
	("j", "<vis-motion-line-down>"),
	("k", "<vis-motion-line-up>"),
	("l", "<vis-motion-char-next>"),
	("T", "<vis-motion-till-line-left>"),
	("t", "<vis-motion-till-line-right>"),
	("W", "<vis-motion-bigword-start-next>"),
	("w", "<vis-motion-word-start-next>"),
];

const TEXTOBJECTS: Table = &[
	("al", "<vis-textobject-line-outer>"),
	("aW", "<vis-textobject-bigword-outer>"),
	("aw", "<vis-textobject-word-outer>"),
	("il", "<vis-textobject-line-inner>"),
	("iW", "<vis-textobject-bigword-inner>"),
	("iw", "<vis-textobject-word-inner>"),
];

const SELECTIONS: Table = &[
	("m", "<vis-selections-save>"),
	("M", "<vis-selections-restore>"),
	("|", "<vis-selections-union>"),
	("&", "<vis-selections-intersect>"),
	("~", "<vis-selections-complement>"),
	("\\", "<vis-selections-minus>"),
	("_", "<vis-selections-trim>"),
	("<S-Tab>", "<vis-selections-align-indent-right>"),
	("<Tab>", "<vis-selections-align-indent-left>"),
];

const OPERATORS: Table = &[
	("0", "<vis-count-zero>"),
	("1", "<vis-count-one>"),
	("2", "<vis-count-two>"),
	("3", "<vis-count-three>"),
	("4", "<vis-count-four>"),
	("5", "<vis-count-five>"),
	("6", "<vis-count-six>"),
	("7", "<vis-count-seven>"),
	("8", "<vis-count-eight>"),
	("9", "<vis-count-nine>"),
	("<", "<vis-operator-shift-left>"),
	(">", "<vis-operator-shift-right>"),
	("\"", "<vis-register>"),
	("'", "<vis-mark>"),
	("c", "<vis-operator-change>"),
	("d", "<vis-operator-delete>"),
	("p", "<vis-put-after>"),
	("P", "<vis-put-before>"),
	("y", "<vis-operator-yank>"),
];

const NORMAL: Table = &[
	("a", "<vis-append-char-next>"),
	("A", "<vis-append-line-end>"),
	("@", "<vis-macro-replay>"),
	(".", "<vis-repeat>"),
	("C", "c$"),
	("<C-c>", "<vis-selections-remove-column>"),
	("<C-d>", "<vis-selection-next>"),
	("<C-j>", "<vis-selection-new-lines-below>"),
	("<C-k>", "<vis-selection-new-lines-above>"),
	("<C-l>", "<vis-selections-remove-column-except>"),
	("<C-n>", "viw"),
	("<C-p>", "<vis-selections-remove-last>"),
	("<C-r>", "<vis-redo>"),
	("<C-u>", "<vis-selection-prev>"),
	("D", "d$"),
	("<Escape>", "<vis-mode-normal-escape>"),
	("gv", "v'^M"),
	("I", "<vis-insert-line-start>"),
	("i", "<vis-mode-insert>"),
	("J", "<vis-join-lines>"),
	("gJ", "<vis-join-lines-trim>"),
	("<M-C-j>", "<vis-selection-new-lines-below-last>"),
	("<M-C-k>", "<vis-selection-new-lines-above-first>"),
	("O", "<vis-open-line-above>"),
	("o", "<vis-open-line-below>"),
	("q", "<vis-macro-record>"),
	("R", "<vis-mode-replace>"),
	("r", "<vis-replace-char>"),
	("S", "^c$"),
	("s", "cl"),
	("<Tab>", "<vis-selections-align>"),
	("u", "<vis-undo>"),
	("v", "<vis-mode-visual-charwise>"),
	("V", "<vis-mode-visual-linewise>"),
	("x", "<vis-delete-char-next>"),
	("X", "dh"),
	("Y", "y$"),
];

const VISUAL: Table = &[
	("A", "<vis-selection-new-lines-end>"),
	("@", "<vis-macro-replay>"),
	("-", "<vis-selections-rotate-left>"),
	("+", "<vis-selections-rotate-right>"),
	("<", "<vis-operator-shift-left>gv"),
	(">", "<vis-operator-shift-right>gv"),
	("<C-a>", "<vis-selection-new-match-all>"),
	("<C-c>", "<vis-selections-remove-column>"),
	("<C-d>", "<vis-selection-next>"),
	("<C-j>", "<C-d>"),
	("<C-k>", "<C-u>"),
	("<C-l>", "<vis-selections-remove-column-except>"),
	("<C-n>", "<vis-selection-new-match-next>"),
	("<C-p>", "<vis-selections-remove-last>"),
	("<C-u>", "<vis-selection-prev>"),
	("<C-x>", "<vis-selection-new-match-skip>"),
	("<Escape>", "<vis-mode-visual-escape>"),
	("I", "<vis-selection-new-lines-begin>"),
	("J", "<vis-join-lines>"),
	("gJ", "<vis-join-lines-trim>"),
	("o", "<vis-selection-flip>"),
	("q", "<vis-macro-record>"),
	("r", "<vis-replace-char>"),
	("s", "c"),
	("V", "<vis-mode-visual-linewise>"),
	("v", "<Escape>"),
	("x", "d"),
];

const VISUAL_LINE: Table = &[("v", "<vis-mode-visual-charwise>"), ("V", "<vis-mode-normal>")];

const READLINE: Table = &[
	("<Backspace>", "<vis-delete-char-prev>"),
	("<C-c>", "<Escape>"),
	("<C-d>", "<vis-delete-char-next>"),
	("<C-h>", "<Backspace>"),
	("<C-u>", "<vis-delete-line-begin>"),
	("<C-v>", "<vis-insert-verbatim>"),
	("<C-w>", "<vis-delete-word-prev>"),
	("<C-e>", "<vis-motion-line-end>"),
	("<C-a>", "<vis-motion-line-start>"),
	("<Delete>", "<vis-delete-char-next>"),
	("<Escape>", "<vis-mode-normal>"),
];

const INSERT: Table = &[
	("<C-d>", "<vis-operator-shift-left><vis-operator-shift-left>"),
	("<C-i>", "<Tab>"),
	("<C-j>", "<vis-insert-verbatim>u000a"),
	("<C-m>", "<Enter>"),
	("<C-r>", "<vis-insert-register>"),
	("<C-t>", "<vis-operator-shift-right><vis-operator-shift-right>"),
	("<Enter>", "<vis-insert-newline>"),
	("<Escape>", "<vis-mode-normal>"),
	("<S-Tab>", "<vis-selections-align-indent-left>"),
	("<Tab>", "<vis-insert-tab>"),
];

/// Default tables of every mode, in precedence order.
///
/// Visual-line and replace mode list only their own keys; lookups fall back
/// to visual and insert mode respectively.
pub static DEFAULT_TABLES: &[(Mode, &[Table])] = &[
	(Mode::OperatorPending, &[OPERATORS, TEXTOBJECTS, MOTIONS, BASIC]),
	(Mode::Normal, &[NORMAL, SELECTIONS, OPERATORS, MOTIONS, BASIC]),
	(Mode::Visual, &[VISUAL, SELECTIONS, TEXTOBJECTS, OPERATORS, MOTIONS, BASIC]),
	(Mode::VisualLine, &[VISUAL_LINE]),
	(Mode::Insert, &[INSERT, READLINE, BASIC]),
	(Mode::Replace, &[]),
];
