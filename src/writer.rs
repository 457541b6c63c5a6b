//! Rendering and writing of the generated TypeScript files.
//!
//! Layout under the output directory:
//!
//! ```text
//! fakers.ts          faker instance with the configured locales (dynamic mode)
//! schemas.ts         one `<Name>Mock` export per component schema
//! response/<tag>.ts  response units of the operations tagged <tag>
//! response/index.ts  re-exports every response unit
//! handlers/<tag>.ts  MSW handlers of the operations tagged <tag>
//! mockHandlers.ts    every handler array merged into `handlers`
//! ```

use crate::generator::GenerationOptions;
use crate::response::{camel_case, reference_name, ComposedOperation};
use crate::serializer::{serialize, write_to_file};
use crate::value::GeneratedValue;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Banner at the top of every generated file.
pub const GENERATED_BANNER: &str =
    "/* eslint-disable */\n// This file is generated by openapi-mock-gen. Do not edit.\n\n";

pub const RESPONSE_DIR: &str = "response";
pub const HANDLERS_DIR: &str = "handlers";

/// Where and how generated files are written.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Base output directory
    pub base_dir: PathBuf,
    /// Prefix of every handler URL
    pub handler_url: String,
    /// Empty `response/` and `handlers/` before writing
    pub clear: bool,
}

/// Writes rendered files under [`WriterOptions::base_dir`].
pub struct MockWriter {
    options: WriterOptions,
    generation: GenerationOptions,
}

impl MockWriter {
    pub fn new(options: WriterOptions, generation: GenerationOptions) -> Self {
        Self {
            options,
            generation,
        }
    }

    /// Writes `fakers.ts`.
    pub fn write_fakers(&self) -> Result<PathBuf> {
        let path = self.options.base_dir.join("fakers.ts");
        write_to_file(&render_fakers(&self.generation.locale), &path)?;
        info!("Generated fakers {}", path.display());
        Ok(path)
    }

    /// Writes `schemas.ts`.
    pub fn write_schemas(&self, schemas: &IndexMap<String, GeneratedValue>) -> Result<PathBuf> {
        let path = self.options.base_dir.join("schemas.ts");
        write_to_file(&render_schemas(schemas, &self.generation), &path)?;
        info!("Generated schema {}", path.display());
        Ok(path)
    }

    /// Writes one response file per tag plus `response/index.ts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be cleared or a file cannot be written.
    pub fn write_responses(
        &self,
        groups: &IndexMap<String, Vec<ComposedOperation>>,
    ) -> Result<Vec<PathBuf>> {
        let directory = self.prepare_directory(RESPONSE_DIR)?;
        let mut written = Vec::new();

        for (tag, operations) in groups {
            let path = directory.join(format!("{}.ts", tag));
            write_to_file(&render_response_file(operations, &self.generation), &path)?;
            info!("Generated {}", path.display());
            written.push(path);
        }

        let index = directory.join("index.ts");
        write_to_file(&render_response_index(groups), &index)?;
        info!("Generated {}", index.display());
        written.push(index);

        Ok(written)
    }

    /// Writes one handler file per tag plus `mockHandlers.ts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be cleared or a file cannot be written.
    pub fn write_handlers(
        &self,
        groups: &IndexMap<String, Vec<ComposedOperation>>,
    ) -> Result<Vec<PathBuf>> {
        let directory = self.prepare_directory(HANDLERS_DIR)?;
        let mut written = Vec::new();

        for (tag, operations) in groups {
            let path = directory.join(format!("{}.ts", tag));
            write_to_file(
                &render_handler_file(tag, operations, &self.options.handler_url),
                &path,
            )?;
            info!("Generated Handler {}", path.display());
            written.push(path);
        }

        let path = self.options.base_dir.join("mockHandlers.ts");
        write_to_file(&render_mock_handlers(groups.keys()), &path)?;
        info!("Generated mock handlers {}", path.display());
        written.push(path);

        Ok(written)
    }

    fn prepare_directory(&self, name: &str) -> Result<PathBuf> {
        let directory = self.options.base_dir.join(name);
        fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create directory: {}", directory.display()))?;
        if self.options.clear {
            clear_directory(&directory)?;
        }
        Ok(directory)
    }
}

/// Removes every entry inside `directory`, keeping the directory itself.
pub fn clear_directory(directory: &Path) -> Result<()> {
    if !directory.exists() {
        return Ok(());
    }
    debug!("Clearing directory: {}", directory.display());

    for entry in fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?
    {
        let path = entry?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// `fakers.ts`: a faker instance using the comma-separated `locale` list.
pub fn render_fakers(locale: &str) -> String {
    let locales = locale
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}import {{ Faker, {} }} from \"@faker-js/faker\"\n\nexport const faker = new Faker({{\n  locale: [{}],\n}})\n",
        GENERATED_BANNER, locales, locales
    )
}

pub fn render_schemas(
    schemas: &IndexMap<String, GeneratedValue>,
    options: &GenerationOptions,
) -> String {
    let uses_faker = !options.is_static() && schemas.values().any(GeneratedValue::contains_code);
    let import = if uses_faker {
        "import { faker } from \"./fakers\"\n\n"
    } else {
        ""
    };

    let exports = schemas
        .iter()
        .map(|(name, value)| format!("export const {}Mock = {}", name, serialize(value, 0, options)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}{}\n", GENERATED_BANNER, import, exports)
}

/// Response units of one tag, each operation preceded by its operation id.
pub fn render_response_file(operations: &[ComposedOperation], options: &GenerationOptions) -> String {
    let uses_faker = !options.is_static()
        && operations
            .iter()
            .flat_map(|op| &op.units)
            .any(|unit| unit.uses_faker);
    let import = if uses_faker {
        "import { faker } from \"../fakers\"\n\n"
    } else {
        ""
    };

    let blocks = operations
        .iter()
        .filter(|op| !op.units.is_empty())
        .map(|op| {
            let units = op
                .units
                .iter()
                .map(|unit| unit.render())
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("// {}\n{}", op.operation.operation_id, units)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}{}\n", GENERATED_BANNER, import, blocks)
}

pub fn render_response_index(groups: &IndexMap<String, Vec<ComposedOperation>>) -> String {
    let exports = groups
        .iter()
        .filter_map(|(tag, operations)| {
            let names = unit_names(operations);
            if names.is_empty() {
                return None;
            }
            Some(format!(
                "export {{\n  {}\n}} from \"./{}\"",
                names.join(",\n  "),
                tag
            ))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}{}\n", GENERATED_BANNER, exports)
}

fn unit_names(operations: &[ComposedOperation]) -> Vec<&str> {
    operations
        .iter()
        .flat_map(|op| &op.units)
        .map(|unit| unit.name.as_str())
        .collect()
}

/// One MSW handler.
///
/// A single response is returned as-is, several are picked from at random, and an operation
/// without responses answers with an empty JSON body. Responses without a body unit answer `null`.
pub fn render_handler(composed: &ComposedOperation) -> String {
    let operation = &composed.operation;
    let mut lines = vec![format!(
        "  http.{}(`${{handlerUrl}}{}`, () => {{",
        operation.method.as_str(),
        operation.pathname
    )];

    let schema_name = |status: u16| {
        operation
            .responses
            .iter()
            .find(|r| r.status_code == status)
            .and_then(|r| r.schema.as_ref())
            .and_then(|s| s.reference())
            .map(reference_name)
    };
    let body = |status: u16| match composed.unit_for(status) {
        Some(unit) => format!("{}()", unit.name),
        None => "null".to_string(),
    };

    match operation.responses.as_slice() {
        [] => lines.push("    return HttpResponse.json()".to_string()),
        [response] => {
            if let Some(name) = schema_name(response.status_code) {
                lines.push(format!("    // Schema is {}", name));
            }
            lines.push(format!(
                "    return HttpResponse.json({}, {{",
                body(response.status_code)
            ));
            lines.push(format!("      status: {},", response.status_code));
            lines.push("    })".to_string());
        }
        responses => {
            lines.push("    const responses = [".to_string());
            for response in responses {
                let comment = schema_name(response.status_code)
                    .map(|name| format!(" // Schema is {}", name))
                    .unwrap_or_default();
                lines.push(format!(
                    "      [{}, {{ status: {} }}],{}",
                    body(response.status_code),
                    response.status_code,
                    comment
                ));
            }
            lines.push("    ]".to_string());
            lines.push(
                "    const randomIndex = Math.floor(Math.random() * responses.length)".to_string(),
            );
            lines.push("    return HttpResponse.json(...responses[randomIndex])".to_string());
        }
    }

    lines.push("  }),".to_string());
    lines.join("\n")
}

pub fn handler_array_name(tag: &str) -> String {
    format!("{}Handlers", camel_case(tag))
}

pub fn render_handler_file(tag: &str, operations: &[ComposedOperation], handler_url: &str) -> String {
    let mut header = vec!["import { http, HttpResponse } from \"msw\"".to_string()];
    let names = unit_names(operations);
    if !names.is_empty() {
        header.push(format!("import {{ {} }} from \"../response\"", names.join(", ")));
    }

    let handlers = operations
        .iter()
        .map(render_handler)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}{}\n\nconst handlerUrl = {}\n\nexport const {} = [\n{}\n]\n",
        GENERATED_BANNER,
        header.join("\n"),
        serde_json::Value::String(handler_url.to_string()),
        handler_array_name(tag),
        handlers
    )
}

pub fn render_mock_handlers<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    let tags: Vec<&String> = tags.into_iter().collect();
    let imports = tags
        .iter()
        .map(|tag| {
            format!(
                "import {{ {} }} from \"./{}/{}\"",
                handler_array_name(tag),
                HANDLERS_DIR,
                tag
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let spreads = tags
        .iter()
        .map(|tag| format!("  ...{},", handler_array_name(tag)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}{}\n\nexport const handlers = [\n{}\n]\n",
        GENERATED_BANNER, imports, spreads
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Mode;
    use crate::response::{HttpMethod, Operation, OperationResponse, ResponseSchema, ResponseUnit};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn response(status_code: u16, reference: Option<&str>) -> OperationResponse {
        OperationResponse {
            status_code,
            schema: reference.map(|r| ResponseSchema::Ref {
                reference: r.to_string(),
            }),
        }
    }

    fn unit(name: &str, status_code: u16, uses_faker: bool) -> ResponseUnit {
        ResponseUnit {
            name: name.to_string(),
            status_code,
            schema_comment: None,
            body: if uses_faker {
                "faker.datatype.boolean()".to_string()
            } else {
                "true".to_string()
            },
            uses_faker,
        }
    }

    fn composed(responses: Vec<OperationResponse>, units: Vec<ResponseUnit>) -> ComposedOperation {
        ComposedOperation {
            operation: Operation {
                pathname: "/pets/:id".to_string(),
                operation_id: "showPet".to_string(),
                tags: vec!["pets".to_string()],
                method: HttpMethod::Get,
                responses,
            },
            units,
        }
    }

    fn body(rendered: &str) -> &str {
        rendered.strip_prefix(GENERATED_BANNER).unwrap()
    }

    #[test]
    fn test_render_fakers() {
        let rendered = render_fakers("ko,en");
        assert_eq!(
            body(&rendered),
            "import { Faker, ko, en } from \"@faker-js/faker\"\n\nexport const faker = new Faker({\n  locale: [ko, en],\n})\n"
        );
    }

    #[test]
    fn test_render_schemas_imports_faker_only_when_used() {
        let mut schemas = IndexMap::new();
        schemas.insert("Flag".to_string(), GeneratedValue::Bool(true));

        let static_options = GenerationOptions::default();
        assert_eq!(
            body(&render_schemas(&schemas, &static_options)),
            "export const FlagMock = true\n"
        );

        schemas.insert("Live".to_string(), GeneratedValue::code("faker.datatype.boolean()"));
        let dynamic = GenerationOptions {
            mode: Mode::Dynamic,
            ..Default::default()
        };
        assert_eq!(
            body(&render_schemas(&schemas, &dynamic)),
            "import { faker } from \"./fakers\"\n\nexport const FlagMock = true\n\nexport const LiveMock = faker.datatype.boolean()\n"
        );
    }

    #[test]
    fn test_render_single_response_handler() {
        let op = composed(
            vec![response(200, Some("#/components/schemas/pet"))],
            vec![unit("getShowPet200", 200, false)],
        );
        assert_eq!(
            render_handler(&op),
            "  http.get(`${handlerUrl}/pets/:id`, () => {\n    // Schema is Pet\n    return HttpResponse.json(getShowPet200(), {\n      status: 200,\n    })\n  }),"
        );
    }

    #[test]
    fn test_render_multiple_response_handler() {
        let op = composed(
            vec![response(200, Some("#/components/schemas/Pet")), response(204, None)],
            vec![unit("getShowPet200", 200, false)],
        );
        let rendered = render_handler(&op);
        assert!(rendered.contains("      [getShowPet200(), { status: 200 }], // Schema is Pet\n"));
        assert!(rendered.contains("      [null, { status: 204 }],\n"));
        assert!(rendered.contains("return HttpResponse.json(...responses[randomIndex])"));
    }

    #[test]
    fn test_render_empty_handler() {
        let op = composed(vec![], vec![]);
        assert!(render_handler(&op).contains("    return HttpResponse.json()\n"));
    }

    #[test]
    fn test_render_handler_file() {
        let op = composed(
            vec![response(200, None)],
            vec![unit("getShowPet200", 200, false)],
        );
        let rendered = render_handler_file("pet store", &[op], "http://localhost");
        let text = body(&rendered);
        assert!(text.starts_with(
            "import { http, HttpResponse } from \"msw\"\nimport { getShowPet200 } from \"../response\"\n\nconst handlerUrl = \"http://localhost\"\n\nexport const petStoreHandlers = [\n"
        ));
        assert!(text.ends_with("  }),\n]\n"));
    }

    #[test]
    fn test_render_response_file_and_index() {
        let ops = vec![
            composed(vec![response(200, None)], vec![unit("getShowPet200", 200, true)]),
            composed(vec![response(204, None)], vec![]),
        ];
        let dynamic = GenerationOptions {
            mode: Mode::Dynamic,
            ..Default::default()
        };
        assert_eq!(
            body(&render_response_file(&ops, &dynamic)),
            "import { faker } from \"../fakers\"\n\n// showPet\nexport const getShowPet200 = () => {\n  return faker.datatype.boolean()\n}\n"
        );

        let mut groups = IndexMap::new();
        groups.insert("pets".to_string(), ops);
        groups.insert("empty".to_string(), vec![]);
        assert_eq!(
            body(&render_response_index(&groups)),
            "export {\n  getShowPet200\n} from \"./pets\"\n"
        );
    }

    #[test]
    fn test_render_mock_handlers() {
        let tags = vec!["pets".to_string(), "user-accounts".to_string()];
        assert_eq!(
            body(&render_mock_handlers(&tags)),
            "import { petsHandlers } from \"./handlers/pets\"\nimport { userAccountsHandlers } from \"./handlers/user-accounts\"\n\nexport const handlers = [\n  ...petsHandlers,\n  ...userAccountsHandlers,\n]\n"
        );
    }

    #[test]
    fn test_write_with_clear() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join(RESPONSE_DIR).join("stale.ts");
        write_to_file("old", &stale).unwrap();

        let writer = MockWriter::new(
            WriterOptions {
                base_dir: dir.path().to_path_buf(),
                handler_url: String::new(),
                clear: true,
            },
            GenerationOptions::default(),
        );
        let mut groups = IndexMap::new();
        groups.insert(
            "pets".to_string(),
            vec![composed(vec![response(200, None)], vec![unit("getShowPet200", 200, false)])],
        );

        let written = writer.write_responses(&groups).unwrap();
        assert_eq!(written.len(), 2);
        assert!(!stale.exists());
        assert!(dir.path().join("response/pets.ts").exists());

        writer.write_handlers(&groups).unwrap();
        assert!(dir.path().join("handlers/pets.ts").exists());
        assert!(dir.path().join("mockHandlers.ts").exists());
    }

    #[test]
    fn test_clear_missing_directory_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(clear_directory(&dir.path().join("nope")).is_ok());
    }
}
