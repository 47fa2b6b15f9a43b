//! Generic utilities for working with diesel.

pub use crate::{eq, query};
use std::slice::Chunks;

/// The maximum number of bound parameters in a single SQLite statement.
pub const SQLITE_MAX_PARAMS: usize = 32766;

/// Helper macro for making queries.
///
/// eq!(table, column_1, column_2)
/// =
/// (table::column_1.eq(column_1), table::column_2.eq(column_2))
#[macro_export]
macro_rules! eq {
    ($t:ident, $c: ident $(,)?) => {
        $t::$c.eq($c)
    };
    ($t:ident, $($c: ident),* $(,)?) => {
        ( $($t::$c.eq($c)),* )
    };
}

/// Helper macro for implementing Queryable and Selectable and ensures the implementations match.
///
/// ```ignore
/// query! {
///     #[derive(Debug)]
///     pub struct WordRow {
///         pub id: i32 = words::id,
///         pub word: String = words::word,
///     }
/// }
/// ```
#[macro_export]
macro_rules! query {
    (
        $(#[ $attr:meta ])*
        $v:vis $kw:ident $name:ident {
            $(
                $fv:vis $field:ident: $t:ty = $table:ident :: $column:ident
            ),* $(,)?
        }
    ) => {
        $(#[ $attr ])*
        #[derive(::diesel::Queryable)]
        #[diesel(check_for_backend(::diesel::sqlite::Sqlite))]
        $v $kw $name {
            $($fv $field: $t),*
        }

        impl<DB: ::diesel::backend::Backend> ::diesel::Selectable<DB> for $name {
            type SelectExpression = ($( $crate::schema::$table::$column, )*);

            fn construct_selection() -> Self::SelectExpression {
                ($( $crate::schema::$table::$column, )*)
            }
        }
    };
}

/// Splits rows for a multi-row insert so that each statement stays under [`SQLITE_MAX_PARAMS`].
pub trait SqliteChunks<T> {
    fn sqlite_chunks(&self) -> Chunks<'_, T>;
}

macro_rules! impl_sqlite_chunks {
    (
        $lit:literal, $($ty:ident),*
    ) => {
        impl<$($ty),*,> SqliteChunks<($($ty),*,)> for Vec<($($ty),*,)> {
            fn sqlite_chunks(&self) -> Chunks<'_, ($($ty),*,)> {
                self.chunks(SQLITE_MAX_PARAMS / $lit)
            }
        }
    };
}

impl_sqlite_chunks!(2, A, B);
impl_sqlite_chunks!(3, A, B, C);
impl_sqlite_chunks!(4, A, B, C, D);
impl_sqlite_chunks!(5, A, B, C, D, E);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn chunks_by_column_count() {
        let rows = vec![(0, 0, 0, 0); 20_000];
        let chunks = rows.sqlite_chunks().map(<[_]>::len).collect::<Vec<_>>();
        assert_eq!(chunks, [8191, 8191, 3618]);
    }
}
