use axum::{extract::Query, response::Html};
use serde::Deserialize;

/// Landing page with the addition form.
pub async fn index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
  <head><title>Demo Services</title></head>
  <body>
    <h1>Demo Services</h1>
    <form action="/add" method="get">
      <input type="number" name="num1" placeholder="First number" />
      <input type="number" name="num2" placeholder="Second number" />
      <button type="submit">Add</button>
    </form>
  </body>
</html>
"#,
    )
}

#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub num1: i64,
    pub num2: i64,
}

/// Renders the sum of the two query parameters.
pub async fn add(Query(q): Query<AddQuery>) -> Html<String> {
    let result = q.num1 + q.num2;
    Html(format!(
        "<!DOCTYPE html>\n<html><body><h1>Result: {}</h1><a href=\"/\">Back</a></body></html>\n",
        result
    ))
}

pub async fn hello() -> &'static str {
    "Hello!"
}
