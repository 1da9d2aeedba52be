// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Markdown rendering for parsed Postman collections.
//!
//! This module transforms a [`Collection`] into a Markdown document meant to
//! be published through a Liquid-based static site generator such as Jekyll.
//!
//! # Output Format
//!
//! The rendered Markdown includes:
//! - A top-level heading with the collection name and its description
//! - One heading per folder or request, nested one level per folder
//! - For each request, in this order: method and URL, headers, body,
//!   query parameters, authentication and saved examples
//! - A dotted separator line after each request
//!
//! User-supplied values (URLs, header, query and auth values, bodies) are
//! wrapped in `{% raw %}` / `{% endraw %}` so `{{variables}}` are printed
//! literally instead of being evaluated by Liquid. Payloads are wrapped in
//! `{% highlight %}` blocks.
//!
//! # Example
//!
//! ```
//! use postman2md::parser::parse_collection;
//! use postman2md::renderer::{render_collection, RenderOptions};
//!
//! let json = r#"{
//!     "info": { "name": "API" },
//!     "item": [{
//!         "name": "Ping",
//!         "request": { "method": "GET", "url": { "raw": "http://x/ping" }, "header": [] },
//!         "response": []
//!     }]
//! }"#;
//!
//! let collection = parse_collection(json).unwrap();
//! let markdown = render_collection(&collection, &RenderOptions::default());
//!
//! assert!(markdown.starts_with("# API\n"));
//! assert!(markdown.contains("##### Method: GET"));
//! assert!(markdown.contains("#### Examples"));
//! ```

use crate::parser::{Auth, Body, Collection, FormField, Item, ItemKind, Parameter, Request, Response};
use std::fmt::Write;

/// Configuration options for Markdown rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of heading levels to shift every heading by.
    ///
    /// A value of 0 renders the collection title as H1 (default).
    /// A value of 1 starts at H2, useful for embedding.
    pub heading_offset: u8,

    /// Whether to drop entries that are unchecked in Postman.
    ///
    /// Applies to headers, query parameters and form fields. A section
    /// left with no entries is omitted entirely.
    pub skip_disabled: bool,
}

impl RenderOptions {
    const fn includes(&self, disabled: bool) -> bool {
        !(self.skip_disabled && disabled)
    }
}

const RAW_OPEN: &str = "{% raw %}";
const RAW_CLOSE: &str = "{% endraw %}";
const DEFAULT_LANGUAGE: &str = "json";
const SEPARATOR: &str = "⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃ ⁃";

/// Heading level of the method line.
const METHOD_LEVEL: usize = 5;
/// Heading level of the per-request sections (Headers, Body, ...).
const SECTION_LEVEL: usize = 4;
/// Heading level of each saved example.
const EXAMPLE_LEVEL: usize = 5;

/// Returns a markdown heading prefix with the given level and offset.
///
/// Deeply nested folders can exceed H6. Most renderers display those as
/// paragraphs, which is accepted.
fn heading(level: usize, offset: u8) -> String {
    "#".repeat(level + usize::from(offset))
}

/// Renders a parsed collection as Markdown.
///
/// This is the main entry point for rendering. It walks the whole item tree
/// and produces a complete Markdown document. Rendering is a pure function
/// of its inputs: the same collection always yields the same bytes.
///
/// # Arguments
///
/// * `collection` - The parsed collection to render
/// * `opts` - Configuration options controlling the output format
///
/// # Returns
///
/// A `String` containing the complete Markdown document.
#[must_use]
pub fn render_collection(collection: &Collection, opts: &RenderOptions) -> String {
    let mut out = String::new();
    writeln!(out, "{} {}\n", heading(1, opts.heading_offset), collection.name).unwrap();
    if let Some(description) = &collection.description {
        writeln!(out, "{description}\n").unwrap();
    }

    render_items(&mut out, &collection.items, 1, opts);

    out
}

/// Renders a sequence of sibling items at the given depth, recursing into
/// folders.
fn render_items(out: &mut String, items: &[Item], depth: usize, opts: &RenderOptions) {
    for item in items {
        writeln!(out, "{} {}\n", heading(depth, opts.heading_offset), item.name).unwrap();
        if let Some(description) = &item.description {
            writeln!(out, "{description}").unwrap();
        }
        out.push('\n');

        match &item.kind {
            ItemKind::Folder(children) => render_items(out, children, depth + 1, opts),
            ItemKind::Request { request, responses } => {
                render_request(out, request, responses, opts);
            }
        }
    }
}

fn render_request(out: &mut String, request: &Request, responses: &[Response], opts: &RenderOptions) {
    match &request.description {
        Some(description) => writeln!(out, "{description}\n").unwrap(),
        None => out.push('\n'),
    }

    writeln!(
        out,
        "{} Method: {}",
        heading(METHOD_LEVEL, opts.heading_offset),
        request.method
    )
    .unwrap();
    raw_line(out, &request.url.raw);

    render_headers(out, &request.headers, opts);
    render_body(out, request.body.as_ref(), opts);
    render_query(out, &request.url.query, opts);
    render_auth(out, request.auth.as_ref(), opts);
    render_examples(out, responses, opts);

    writeln!(out, "{SEPARATOR}\n").unwrap();
}

fn render_headers(out: &mut String, headers: &[Parameter], opts: &RenderOptions) {
    let headers = visible(headers, opts);
    if headers.is_empty() {
        return;
    }

    section(out, "Headers", opts);
    table_header(out, &["Key", "Value", "Type"]);
    for header in headers {
        table_row(
            out,
            &[
                text(header.key.as_ref()),
                verbatim(text(header.value.as_ref())).as_str(),
                text(header.kind.as_ref()),
            ],
        );
    }
    out.push('\n');
}

fn render_body(out: &mut String, body: Option<&Body>, opts: &RenderOptions) {
    let Some(body) = body else {
        return;
    };
    let has_fields = match body {
        Body::FormData(fields) => fields.iter().any(|f| opts.includes(f.disabled)),
        Body::UrlEncoded(fields) => fields.iter().any(|f| opts.includes(f.disabled)),
        _ => true,
    };
    if !has_fields {
        return;
    }

    section(out, &format!("Body (**{}**)", body.mode()), opts);
    match body {
        Body::Raw { raw, language } => {
            code_block(out, language.as_deref().unwrap_or(DEFAULT_LANGUAGE), raw);
        }
        Body::FormData(fields) => {
            table_header(out, &["Param", "Value", "Type"]);
            for field in fields.iter().filter(|f| opts.includes(f.disabled)) {
                table_row(
                    out,
                    &[
                        text(field.key.as_ref()),
                        form_value(field).as_str(),
                        text(field.kind.as_ref()),
                    ],
                );
            }
            out.push('\n');
        }
        Body::UrlEncoded(fields) => {
            table_header(out, &["Key", "Value", "Description", "Type"]);
            for field in visible(fields, opts) {
                table_row(
                    out,
                    &[
                        text(field.key.as_ref()),
                        text(field.value.as_ref()),
                        text(field.description.as_ref()),
                        text(field.kind.as_ref()),
                    ],
                );
            }
            out.push('\n');
        }
        Body::GraphQl { query, variables } => {
            code_block(out, "graphql", query);
            if let Some(variables) = variables {
                code_block(out, DEFAULT_LANGUAGE, variables);
            }
        }
        Body::File { src } => raw_line(out, text(src.as_ref())),
    }
}

/// Resolves the value cell of a form field.
///
/// File fields show their source path. Text fields drop literal `\n`
/// escape sequences left behind by the exporter.
fn form_value(field: &FormField) -> String {
    if field.is_file() {
        return field.src.clone().unwrap_or_default();
    }
    field
        .value
        .as_deref()
        .map(|value| value.replace("\\n", ""))
        .unwrap_or_default()
}

fn render_query(out: &mut String, query: &[Parameter], opts: &RenderOptions) {
    let query = visible(query, opts);
    if query.is_empty() {
        return;
    }

    section(out, "Query Params", opts);
    table_header(out, &["Param", "Value", "Description"]);
    for param in query {
        table_row(
            out,
            &[
                text(param.key.as_ref()),
                verbatim(text(param.value.as_ref())).as_str(),
                text(param.description.as_ref()),
            ],
        );
    }
    out.push('\n');
}

fn render_auth(out: &mut String, auth: Option<&Auth>, opts: &RenderOptions) {
    let Some(auth) = auth else {
        return;
    };

    section(out, &format!("Authentication {}", auth.kind()), opts);
    match auth {
        Auth::Bearer(params) => {
            table_header(out, &["Param", "Value", "Type"]);
            for param in params {
                table_row(
                    out,
                    &[
                        text(param.key.as_ref()),
                        verbatim(text(param.value.as_ref())).as_str(),
                        text(param.kind.as_ref()),
                    ],
                );
            }
            out.push('\n');
        }
        Auth::Other { .. } => {}
    }
}

fn render_examples(out: &mut String, responses: &[Response], opts: &RenderOptions) {
    section(out, "Examples", opts);

    for (index, response) in responses.iter().enumerate() {
        let level = heading(EXAMPLE_LEVEL, opts.heading_offset);
        match &response.name {
            Some(name) => writeln!(out, "{level} Example: {name}\n").unwrap(),
            None => writeln!(out, "{level} Example {}\n", index + 1).unwrap(),
        }

        if let Some(original) = &response.original_request {
            raw_line(out, &format!("{} {}", original.method, original.url.raw));
        }

        if let Some(code) = response.code {
            match &response.status {
                Some(status) => writeln!(out, "**Status: {code} {status}**\n").unwrap(),
                None => writeln!(out, "**Status: {code}**\n").unwrap(),
            }
        }

        match response.body.as_deref().filter(|body| !body.trim().is_empty()) {
            Some(body) => code_block(
                out,
                response.preview_language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
                body,
            ),
            None => out.push_str("*No response body*\n\n"),
        }
    }
}

/// Writes a per-request section heading followed by a blank line.
fn section(out: &mut String, title: &str, opts: &RenderOptions) {
    writeln!(out, "{} {title}\n", heading(SECTION_LEVEL, opts.heading_offset)).unwrap();
}

/// Filters out disabled entries when the options ask for it.
fn visible<'a>(params: &'a [Parameter], opts: &RenderOptions) -> Vec<&'a Parameter> {
    params.iter().filter(|p| opts.includes(p.disabled)).collect()
}

/// Returns the text of an optional field, or `""` when absent.
fn text(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Wraps a value so Liquid prints it literally.
///
/// A value that itself contains `{% endraw %}` closes the region early and
/// the remainder is evaluated by Liquid.
fn verbatim(value: &str) -> String {
    format!("{RAW_OPEN}{value}{RAW_CLOSE}")
}

/// Writes a single tab-indented line inside a raw region.
fn raw_line(out: &mut String, line: &str) {
    writeln!(out, "{RAW_OPEN}\n\t{line}\n{RAW_CLOSE}\n").unwrap();
}

/// Writes a highlighted code block whose content is protected from Liquid.
fn code_block(out: &mut String, language: &str, content: &str) {
    writeln!(
        out,
        "{{% highlight {language} %}}\n{RAW_OPEN}\n{content}\n{RAW_CLOSE}\n{{% endhighlight %}}\n"
    )
    .unwrap();
}

fn table_header(out: &mut String, columns: &[&str]) {
    for column in columns {
        write!(out, "|{column}").unwrap();
    }
    out.push_str("|\n");
    for _ in columns {
        out.push_str("|---");
    }
    out.push_str("|\n");
}

fn table_row(out: &mut String, cells: &[&str]) {
    for cell in cells {
        write!(out, "|{}", escape_table_cell(cell)).unwrap();
    }
    out.push_str("|\n");
}

/// Escapes pipes and line breaks so a value cannot split a table row.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\r', '\n'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Url;

    fn make_collection(items: Vec<Item>) -> Collection {
        Collection {
            name: "API".into(),
            description: None,
            items,
        }
    }

    fn make_request(method: &str, url: &str) -> Request {
        Request {
            method: method.into(),
            url: Url {
                raw: url.into(),
                query: Vec::new(),
            },
            headers: Vec::new(),
            body: None,
            auth: None,
            description: None,
        }
    }

    fn leaf(name: &str, request: Request, responses: Vec<Response>) -> Item {
        Item {
            name: name.into(),
            description: None,
            kind: ItemKind::Request {
                request: Box::new(request),
                responses,
            },
        }
    }

    fn folder(name: &str, children: Vec<Item>) -> Item {
        Item {
            name: name.into(),
            description: None,
            kind: ItemKind::Folder(children),
        }
    }

    fn param(key: &str, value: &str) -> Parameter {
        Parameter {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Parameter::default()
        }
    }

    fn response(name: &str) -> Response {
        Response {
            name: Some(name.into()),
            code: None,
            status: None,
            body: None,
            original_request: None,
            preview_language: None,
        }
    }

    fn render_one(request: Request, responses: Vec<Response>) -> String {
        let collection = make_collection(vec![leaf("Call", request, responses)]);
        render_collection(&collection, &RenderOptions::default())
    }

    #[test]
    fn renders_title_and_blank_line_without_description() {
        let output = render_collection(&make_collection(vec![]), &RenderOptions::default());

        assert_eq!(output, "# API\n\n");
    }

    #[test]
    fn renders_collection_description() {
        let mut collection = make_collection(vec![]);
        collection.description = Some("All the endpoints.".into());
        let output = render_collection(&collection, &RenderOptions::default());

        assert_eq!(output, "# API\n\nAll the endpoints.\n\n");
    }

    #[test]
    fn renders_minimal_request_exactly() {
        let output = render_one(make_request("GET", "http://x/ping"), vec![]);

        let expected = format!(
            "# API\n\n\
             # Call\n\n\n\
             \n\
             ##### Method: GET\n\
             {{% raw %}}\n\thttp://x/ping\n{{% endraw %}}\n\n\
             #### Examples\n\n\
             {SEPARATOR}\n\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn nests_folder_headings_by_depth() {
        let collection = make_collection(vec![folder(
            "Users",
            vec![
                folder("Admin", vec![leaf("Ban", make_request("POST", "http://x/ban"), vec![])]),
                leaf("List", make_request("GET", "http://x/users"), vec![]),
            ],
        )]);
        let output = render_collection(&collection, &RenderOptions::default());

        let users = output.find("\n# Users\n").unwrap();
        let admin = output.find("\n## Admin\n").unwrap();
        let ban = output.find("\n### Ban\n").unwrap();
        let list = output.find("\n## List\n").unwrap();
        assert!(users < admin && admin < ban && ban < list);
    }

    #[test]
    fn heading_offset_shifts_every_heading() {
        let collection = make_collection(vec![leaf("Ping", make_request("GET", "http://x"), vec![])]);
        let opts = RenderOptions {
            heading_offset: 2,
            ..Default::default()
        };
        let output = render_collection(&collection, &opts);

        assert!(output.starts_with("### API\n"));
        assert!(output.contains("\n### Ping\n"));
        assert!(output.contains("####### Method: GET"));
        assert!(output.contains("###### Examples"));
    }

    #[test]
    fn does_not_clamp_deep_headings() {
        let mut item = leaf("Deep", make_request("GET", "http://x"), vec![]);
        for level in 0..7 {
            item = folder(&format!("Level {level}"), vec![item]);
        }
        let output = render_collection(&make_collection(vec![item]), &RenderOptions::default());

        assert!(output.contains(&format!("{} Deep\n", "#".repeat(8))));
    }

    #[test]
    fn renders_item_description() {
        let mut item = folder("Users", vec![]);
        item.description = Some("Manage users.".into());
        let output = render_collection(&make_collection(vec![item]), &RenderOptions::default());

        assert!(output.contains("# Users\n\nManage users.\n\n"));
    }

    #[test]
    fn renders_request_description() {
        let mut request = make_request("GET", "http://x");
        request.description = Some("Checks liveness.".into());
        let output = render_one(request, vec![]);

        assert!(output.contains("Checks liveness.\n\n##### Method: GET"));
    }

    #[test]
    fn renders_headers_as_single_table() {
        let mut request = make_request("GET", "http://x");
        request.headers = vec![
            Parameter {
                kind: Some("text".into()),
                ..param("Accept", "application/json")
            },
            param("Authorization", "Bearer {{token}}"),
        ];
        let output = render_one(request, vec![]);

        assert_eq!(output.matches("#### Headers").count(), 1);
        assert!(output.contains(
            "|Key|Value|Type|\n\
             |---|---|---|\n\
             |Accept|{% raw %}application/json{% endraw %}|text|\n\
             |Authorization|{% raw %}Bearer {{token}}{% endraw %}||\n"
        ));
    }

    #[test]
    fn skips_disabled_entries_when_requested() {
        let mut request = make_request("GET", "http://x");
        request.headers = vec![Parameter {
            disabled: true,
            ..param("X-Debug", "1")
        }];
        request.url.query = vec![
            param("page", "1"),
            Parameter {
                disabled: true,
                ..param("debug", "true")
            },
        ];
        let collection = make_collection(vec![leaf("Call", request, vec![])]);

        let shown = render_collection(&collection, &RenderOptions::default());
        assert!(shown.contains("X-Debug"));
        assert!(shown.contains("|debug|"));

        let opts = RenderOptions {
            skip_disabled: true,
            ..Default::default()
        };
        let hidden = render_collection(&collection, &opts);
        assert!(!hidden.contains("#### Headers"));
        assert!(hidden.contains("|page|"));
        assert!(!hidden.contains("|debug|"));
    }

    #[test]
    fn renders_raw_body_in_highlight_block() {
        let mut request = make_request("POST", "http://x");
        request.body = Some(Body::Raw {
            raw: "{\"name\": \"{{name}}\"}".into(),
            language: None,
        });
        let output = render_one(request, vec![]);

        assert!(output.contains(
            "#### Body (**raw**)\n\n\
             {% highlight json %}\n\
             {% raw %}\n\
             {\"name\": \"{{name}}\"}\n\
             {% endraw %}\n\
             {% endhighlight %}\n"
        ));
    }

    #[test]
    fn uses_raw_body_language() {
        let mut request = make_request("POST", "http://x");
        request.body = Some(Body::Raw {
            raw: "<a/>".into(),
            language: Some("xml".into()),
        });
        let output = render_one(request, vec![]);

        assert!(output.contains("{% highlight xml %}"));
    }

    #[test]
    fn renders_formdata_body() {
        let mut request = make_request("POST", "http://x");
        request.body = Some(Body::FormData(vec![
            FormField {
                key: Some("bio".into()),
                value: Some("line1\\nline2".into()),
                kind: Some("text".into()),
                ..FormField::default()
            },
            FormField {
                key: Some("avatar".into()),
                value: Some("ignored".into()),
                kind: Some("file".into()),
                src: Some("/tmp/a.png".into()),
                ..FormField::default()
            },
            FormField {
                key: Some("empty".into()),
                ..FormField::default()
            },
        ]));
        let output = render_one(request, vec![]);

        assert!(output.contains("#### Body (**formdata**)\n\n|Param|Value|Type|\n|---|---|---|\n"));
        assert!(output.contains("|bio|line1line2|text|\n"));
        assert!(output.contains("|avatar|/tmp/a.png|file|\n"));
        assert!(output.contains("|empty|||\n"));
    }

    #[test]
    fn form_value_strips_escaped_newlines_only() {
        let field = FormField {
            value: Some("a\\nb\nc".into()),
            ..FormField::default()
        };

        assert_eq!(form_value(&field), "ab\nc");
    }

    #[test]
    fn renders_urlencoded_body() {
        let mut request = make_request("POST", "http://x/token");
        request.body = Some(Body::UrlEncoded(vec![Parameter {
            description: Some("OAuth grant".into()),
            kind: Some("text".into()),
            ..param("grant_type", "password")
        }]));
        let output = render_one(request, vec![]);

        assert!(output.contains(
            "|Key|Value|Description|Type|\n\
             |---|---|---|---|\n\
             |grant_type|password|OAuth grant|text|\n"
        ));
    }

    #[test]
    fn renders_graphql_body_with_variables() {
        let mut request = make_request("POST", "http://x/graphql");
        request.body = Some(Body::GraphQl {
            query: "{ me { id } }".into(),
            variables: Some("{\"a\": 1}".into()),
        });
        let output = render_one(request, vec![]);

        assert!(output.contains("#### Body (**graphql**)"));
        assert!(output.contains("{% highlight graphql %}\n{% raw %}\n{ me { id } }\n"));
        assert!(output.contains("{% highlight json %}\n{% raw %}\n{\"a\": 1}\n"));
    }

    #[test]
    fn omits_body_without_fields() {
        let mut request = make_request("POST", "http://x");
        request.body = Some(Body::FormData(vec![FormField {
            key: Some("draft".into()),
            disabled: true,
            ..FormField::default()
        }]));
        let collection = make_collection(vec![leaf("Call", request, vec![])]);

        let shown = render_collection(&collection, &RenderOptions::default());
        assert!(shown.contains("|draft|||\n"));

        let opts = RenderOptions {
            skip_disabled: true,
            ..Default::default()
        };
        let hidden = render_collection(&collection, &opts);
        assert!(!hidden.contains("#### Body"));
    }

    #[test]
    fn renders_file_body_source() {
        let mut request = make_request("PUT", "http://x/upload");
        request.body = Some(Body::File {
            src: Some("/tmp/data.bin".into()),
        });
        let output = render_one(request, vec![]);

        assert!(output.contains("#### Body (**file**)\n\n{% raw %}\n\t/tmp/data.bin\n{% endraw %}\n"));
    }

    #[test]
    fn renders_query_params() {
        let mut request = make_request("GET", "http://x/?page=2&sort");
        request.url.query = vec![
            Parameter {
                description: Some("Page number".into()),
                ..param("page", "2")
            },
            Parameter {
                key: Some("sort".into()),
                ..Parameter::default()
            },
        ];
        let output = render_one(request, vec![]);

        assert!(output.contains(
            "#### Query Params\n\n\
             |Param|Value|Description|\n\
             |---|---|---|\n\
             |page|{% raw %}2{% endraw %}|Page number|\n\
             |sort|{% raw %}{% endraw %}||\n"
        ));
    }

    #[test]
    fn renders_bearer_auth_table() {
        let mut request = make_request("GET", "http://x");
        request.auth = Some(Auth::Bearer(vec![Parameter {
            kind: Some("string".into()),
            ..param("token", "{{token}}")
        }]));
        let output = render_one(request, vec![]);

        assert!(output.contains(
            "#### Authentication bearer\n\n\
             |Param|Value|Type|\n\
             |---|---|---|\n\
             |token|{% raw %}{{token}}{% endraw %}|string|\n"
        ));
    }

    #[test]
    fn renders_other_auth_heading_without_table() {
        let mut request = make_request("GET", "http://x");
        request.auth = Some(Auth::Other {
            kind: "basic".into(),
        });
        let output = render_one(request, vec![]);

        assert!(output.contains("#### Authentication basic\n\n#### Examples"));
    }

    #[test]
    fn emits_sections_in_fixed_order() {
        let mut request = make_request("POST", "http://x");
        request.headers = vec![param("Accept", "*/*")];
        request.body = Some(Body::Raw {
            raw: "{}".into(),
            language: None,
        });
        request.url.query = vec![param("q", "1")];
        request.auth = Some(Auth::Bearer(vec![param("token", "t")]));
        let output = render_one(request, vec![response("Ok")]);

        let positions: Vec<usize> = [
            "##### Method: POST",
            "#### Headers",
            "#### Body",
            "#### Query Params",
            "#### Authentication",
            "#### Examples",
            SEPARATOR,
        ]
        .iter()
        .map(|marker| output.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn omits_absent_sections() {
        let output = render_one(make_request("GET", "http://x"), vec![]);

        assert!(!output.contains("#### Headers"));
        assert!(!output.contains("#### Body"));
        assert!(!output.contains("#### Query Params"));
        assert!(!output.contains("#### Authentication"));
        assert!(output.contains("#### Examples"));
    }

    #[test]
    fn renders_every_example() {
        let responses = vec![response("Created"), response("Conflict"), response("Invalid")];
        let output = render_one(make_request("POST", "http://x"), responses);

        assert_eq!(output.matches("##### Example: ").count(), 3);
        let created = output.find("##### Example: Created").unwrap();
        let conflict = output.find("##### Example: Conflict").unwrap();
        let invalid = output.find("##### Example: Invalid").unwrap();
        assert!(created < conflict && conflict < invalid);
    }

    #[test]
    fn renders_example_details() {
        let example = Response {
            code: Some(200),
            status: Some("OK".into()),
            body: Some("{\"id\": 1}".into()),
            original_request: Some(Box::new(make_request("GET", "http://x/users/1"))),
            ..response("Found")
        };
        let output = render_one(make_request("GET", "http://x/users/1"), vec![example]);

        assert!(output.contains(
            "##### Example: Found\n\n\
             {% raw %}\n\tGET http://x/users/1\n{% endraw %}\n\n\
             **Status: 200 OK**\n\n\
             {% highlight json %}\n{% raw %}\n{\"id\": 1}\n{% endraw %}\n{% endhighlight %}\n"
        ));
    }

    #[test]
    fn notes_missing_response_body() {
        let example = Response {
            code: Some(204),
            body: Some("  ".into()),
            ..response("Deleted")
        };
        let output = render_one(make_request("DELETE", "http://x/1"), vec![example]);

        assert!(output.contains("**Status: 204**\n\n*No response body*\n"));
        assert!(!output.contains("{% highlight"));
    }

    #[test]
    fn numbers_unnamed_examples() {
        let unnamed = Response {
            name: None,
            ..response("")
        };
        let output = render_one(make_request("GET", "http://x"), vec![response("First"), unnamed]);

        assert!(output.contains("##### Example 2\n"));
    }

    #[test]
    fn uses_preview_language_for_example_body() {
        let example = Response {
            body: Some("<p>hi</p>".into()),
            preview_language: Some("html".into()),
            ..response("Page")
        };
        let output = render_one(make_request("GET", "http://x"), vec![example]);

        assert!(output.contains("{% highlight html %}\n{% raw %}\n<p>hi</p>\n"));
    }

    #[test]
    fn escapes_pipes_in_table_cells() {
        let mut request = make_request("GET", "http://x");
        request.url.query = vec![param("filter", "a|b")];
        let output = render_one(request, vec![]);

        assert!(output.contains("|filter|{% raw %}a\\|b{% endraw %}||\n"));
    }

    #[test]
    fn keeps_multiline_cells_on_one_row() {
        let mut request = make_request("GET", "http://x");
        request.url.query = vec![Parameter {
            description: Some("first line\nsecond line".into()),
            ..param("a", "1")
        }];
        request.headers = vec![param("X-Note", "one\r\ntwo")];
        let output = render_one(request, vec![]);

        assert!(output.contains("|a|{% raw %}1{% endraw %}|first line<br>second line|\n"));
        assert!(output.contains("|X-Note|{% raw %}one<br>two{% endraw %}||\n"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let collection = make_collection(vec![
            folder("Users", vec![leaf("List", make_request("GET", "http://x"), vec![response("Ok")])]),
            leaf("Ping", make_request("GET", "http://x/ping"), vec![]),
        ]);
        let opts = RenderOptions::default();

        assert_eq!(render_collection(&collection, &opts), render_collection(&collection, &opts));
    }

    #[test]
    fn separates_consecutive_requests() {
        let collection = make_collection(vec![
            leaf("One", make_request("GET", "http://x/1"), vec![]),
            leaf("Two", make_request("GET", "http://x/2"), vec![]),
        ]);
        let output = render_collection(&collection, &RenderOptions::default());

        assert_eq!(output.matches(SEPARATOR).count(), 2);
        assert!(output.contains(&format!("{SEPARATOR}\n\n# Two\n")));
    }
}
