//! Substring `LIKE` predicates that treat the needle literally.

use sea_orm::sea_query::{Expr, IntoColumnRef, LikeExpr, SimpleExpr};

const LIKE_ESCAPE: char = '\\';

/// `col LIKE '%needle%' ESCAPE '\'`
pub(crate) fn contains<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    Expr::col(col).like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE))
}

/// `%needle%` with LIKE metacharacters escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
