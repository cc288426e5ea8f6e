//! Declaration-level Go syntax tree. Function bodies are not modelled beyond
//! the type declarations found inside them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub name: Option<String>,
    /// Unquoted import path.
    pub path: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

/// A `type` declaration, either a single spec or a parenthesised group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: String,
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<Results>,
    pub start_line: u32,
    pub end_line: u32,
    /// Type declarations inside the body, in source order.
    pub nested: Vec<GenDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results {
    /// A single unparenthesised result type.
    Type(String),
    List(FieldList),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Empty for unnamed parameters.
    pub names: Vec<String>,
    /// Rendered type expression.
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Option<FieldList>,
    pub alias: bool,
    /// Rendered underlying type expression.
    pub ty: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl Field {
    /// `names-joined-by-", "` then the type, e.g. `a, b int`.
    pub fn render(&self) -> String {
        if self.names.is_empty() {
            self.ty.clone()
        } else {
            format!("{} {}", self.names.join(", "), self.ty)
        }
    }
}

impl FieldList {
    pub fn render(&self, open: char, close: char) -> String {
        let inner: Vec<String> = self.fields.iter().map(Field::render).collect();
        format!("{open}{}{close}", inner.join(", "))
    }

    pub fn render_params(&self) -> String {
        self.render('(', ')')
    }
}

impl Results {
    pub fn render(&self) -> String {
        match self {
            Results::Type(ty) => ty.clone(),
            Results::List(list) => list.render_params(),
        }
    }
}

impl FuncDecl {
    /// The receiver's first field in parentheses, e.g. `(t *Thing)`.
    pub fn receiver(&self) -> Option<String> {
        let first = self.recv.as_ref()?.fields.first()?;
        Some(format!("({})", first.render()))
    }

    pub fn signature(&self) -> String {
        let mut sig = String::from("func ");
        if let Some(recv) = self.receiver() {
            sig.push_str(&recv);
            sig.push(' ');
        }
        sig.push_str(&self.name);
        if let Some(tp) = &self.type_params {
            sig.push_str(&tp.render('[', ']'));
        }
        sig.push_str(&self.params.render_params());
        if let Some(res) = &self.results {
            sig.push(' ');
            sig.push_str(&res.render());
        }
        sig
    }
}

impl TypeSpec {
    pub fn signature(&self) -> String {
        let mut sig = format!("type {}", self.name);
        if let Some(tp) = &self.type_params {
            sig.push_str(&tp.render('[', ']'));
        }
        if self.alias {
            sig.push_str(" =");
        }
        sig.push(' ');
        sig.push_str(&self.ty);
        sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(names: &[&str], ty: &str) -> Field {
        Field {
            names: names.iter().map(|s| s.to_string()).collect(),
            ty: ty.to_string(),
        }
    }

    #[test]
    fn method_signature_embeds_receiver() {
        let decl = FuncDecl {
            recv: Some(FieldList {
                fields: vec![field(&["t"], "*T")],
            }),
            name: "Bar".into(),
            type_params: None,
            params: FieldList {
                fields: vec![field(&["a", "b"], "int"), field(&["s"], "...string")],
            },
            results: Some(Results::Type("error".into())),
            start_line: 7,
            end_line: 10,
            nested: vec![],
        };
        assert_eq!(decl.receiver().as_deref(), Some("(t *T)"));
        assert_eq!(decl.signature(), "func (t *T) Bar(a, b int, s ...string) error");
    }

    #[test]
    fn type_spec_signature_forms() {
        let spec = TypeSpec {
            name: "List".into(),
            type_params: Some(FieldList {
                fields: vec![field(&["T"], "any")],
            }),
            alias: false,
            ty: "struct{ items []T }".into(),
            start_line: 1,
            end_line: 3,
        };
        assert_eq!(spec.signature(), "type List[T any] struct{ items []T }");

        let alias = TypeSpec {
            name: "A".into(),
            type_params: None,
            alias: true,
            ty: "string".into(),
            start_line: 1,
            end_line: 1,
        };
        assert_eq!(alias.signature(), "type A = string");
    }
}
