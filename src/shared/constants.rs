pub const LIST_ITEM_MARKER: &str = "-";
pub const LIST_ITEM_PREFIX: &str = "- ";

pub const COLON: char = ':';
pub const COMMA: char = ',';
pub const DOT: char = '.';
pub const PIPE: char = '|';
pub const SPACE: char = ' ';

pub const OPEN_BRACKET: char = '[';
pub const CLOSE_BRACKET: char = ']';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';

pub const NULL_LITERAL: &str = "null";
pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

pub const BACKSLASH: char = '\\';
pub const DOUBLE_QUOTE: char = '"';
pub const NEWLINE: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const TAB: char = '\t';
