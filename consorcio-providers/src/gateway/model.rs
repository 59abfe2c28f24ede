//! Query descriptions understood by the gateway's table reads.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// `select <columns> from <table> where <column> = <value>... order by <order>`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub table: String,
    pub columns: String,
    pub equals: Vec<(String, String)>,
    pub order: Option<Order>,
}

impl Query {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            columns: "*".to_owned(),
            equals: vec![],
            order: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_owned();
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.equals.push((column.to_owned(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_owned(),
            direction,
        });
        self
    }
}
