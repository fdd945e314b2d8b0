//! Response type construction.
//!
//! Pass 1 walks every operation in name order and resolves each response
//! level into a named [`TypeDef`], claiming names in one [`TypeRegistry`].
//! Pass 2 (the `codegen::types` emitter) writes the trees out in post-order
//! so nested types precede the types that hold them.

use std::collections::BTreeSet;

use stackgen_define::{Field, Operation, OverrideTables, WrapperShape};

use crate::mapper::{MappedType, TypeMapper};
use crate::naming::{field_ident, singular, to_snake_case, type_name};
use crate::registry::{Canonical, TypeRegistry, canonical_type_name, is_canonical_field};

/// One field of a generated response type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Name on the wire.
    pub wire: String,
    /// Rust field identifier.
    pub ident: String,
    pub ty: MappedType,
    pub doc: String,
}

/// One generated response type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub doc: String,
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    pub fn field(&self, wire: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.wire == wire)
    }

    /// Returns `true` if the type has a field with this wire name.
    pub fn has_field(&self, wire: &str) -> bool {
        self.field(wire).is_some()
    }
}

/// A type together with the nested types it introduced.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTree {
    pub def: TypeDef,
    pub children: Vec<TypeTree>,
}

impl TypeTree {
    fn leaf(def: TypeDef) -> Self {
        Self {
            def,
            children: Vec::new(),
        }
    }

    /// Definitions in emission order: children before their parent.
    pub fn post_order(&self) -> Vec<&TypeDef> {
        let mut out = Vec::new();
        self.collect_post_order(&mut out);
        out
    }

    fn collect_post_order<'a>(&'a self, out: &mut Vec<&'a TypeDef>) {
        for child in &self.children {
            child.collect_post_order(out);
        }
        out.push(&self.def);
    }

    /// Finds a definition anywhere in the tree.
    pub fn find(&self, name: &str) -> Option<&TypeDef> {
        if self.def.name == name {
            return Some(&self.def);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    fn for_each_def_mut(&mut self, f: &mut impl FnMut(&mut TypeDef)) {
        for child in &mut self.children {
            child.for_each_def_mut(f);
        }
        f(&mut self.def);
    }
}

/// How an operation's payload sits under its root type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// The root type holds the response fields directly.
    Plain,
    /// `count` plus a sequence of `entity` under `field`.
    List { entity: String, field: String },
    /// One `entity` object under `field`.
    Object { entity: String, field: String },
    /// A scalar under `field`.
    Scalar { field: String },
}

/// Every type generated for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationTypes {
    pub operation: String,
    /// Name of the type the call method returns.
    pub root: String,
    pub shape: ResponseShape,
    pub tree: TypeTree,
}

impl OperationTypes {
    pub fn root_def(&self) -> &TypeDef {
        &self.tree.def
    }

    /// The entity type of a list or object response.
    pub fn entity_def(&self) -> Option<&TypeDef> {
        match &self.shape {
            ResponseShape::List { entity, .. } | ResponseShape::Object { entity, .. } => {
                self.tree.find(entity)
            }
            _ => None,
        }
    }
}

/// Resolves response trees into named type definitions.
#[derive(Debug)]
pub struct ResponseTypeBuilder<'a> {
    tables: &'a OverrideTables,
    mapper: TypeMapper<'a>,
    registry: TypeRegistry,
}

impl<'a> ResponseTypeBuilder<'a> {
    pub fn new(tables: &'a OverrideTables) -> Self {
        Self {
            tables,
            mapper: TypeMapper::new(tables),
            registry: TypeRegistry::new(),
        }
    }

    /// Builds the types of every operation.
    ///
    /// Operations are processed sorted by name so name claims, and with
    /// them the generated output, do not depend on input order. References
    /// to entity types that no operation emits degrade to opaque JSON.
    pub fn build_all(mut self, operations: &[&Operation]) -> Vec<OperationTypes> {
        let mut sorted: Vec<&Operation> = operations.to_vec();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut built: Vec<OperationTypes> = sorted.iter().map(|op| self.build(op)).collect();

        let emitted: BTreeSet<String> = built
            .iter()
            .flat_map(|t| t.tree.post_order())
            .map(|def| def.name.clone())
            .collect();

        for types in &mut built {
            types.tree.for_each_def_mut(&mut |def: &mut TypeDef| {
                for field in &mut def.fields {
                    if let MappedType::Entity { name, .. } = &field.ty
                        && !emitted.contains(name)
                    {
                        field.ty = MappedType::Raw;
                    }
                }
            });
        }

        built
    }

    /// Builds the types of one operation.
    pub fn build(&mut self, op: &Operation) -> OperationTypes {
        let tables = self.tables;
        let candidate = tables
            .custom_response_name(&op.name)
            .map(type_name)
            .unwrap_or_else(|| format!("{}Response", type_name(&op.name)));
        let root = self.registry.claim(&candidate);
        let doc = if op.description.is_empty() {
            format!("Response of `{}`.", op.name)
        } else {
            op.description.clone()
        };

        let (mut tree, shape) = match tables.custom_wrapper(&op.name) {
            Some(wrapper) => {
                let field = field_ident(&wrapper.payload_key);
                match &wrapper.shape {
                    WrapperShape::Sequence => {
                        let entity_candidate = wrapper
                            .type_name
                            .as_deref()
                            .map(type_name)
                            .unwrap_or_else(|| list_entity(&op.name).0);
                        self.wrapped(op, &root, &doc, &entity_candidate, &wrapper.payload_key, &field, true)
                    }
                    WrapperShape::Object => {
                        let entity_candidate = wrapper
                            .type_name
                            .as_deref()
                            .map(type_name)
                            .unwrap_or_else(|| type_name(&wrapper.payload_key));
                        self.wrapped(op, &root, &doc, &entity_candidate, &wrapper.payload_key, &field, false)
                    }
                    WrapperShape::Scalar(token) => {
                        let def = TypeDef {
                            name: root.clone(),
                            doc: doc.clone(),
                            fields: vec![FieldDef {
                                wire: wrapper.payload_key.clone(),
                                ident: field.clone(),
                                ty: self.mapper.map(&op.name, &wrapper.payload_key, token),
                                doc: String::new(),
                            }],
                        };
                        (TypeTree::leaf(def), ResponseShape::Scalar { field })
                    }
                }
            }
            None if tables.is_list_operation(&op.name) => {
                let (entity, plural) = list_entity(&op.name);
                let payload_key = entity.to_lowercase();
                let field = field_ident(&plural);
                self.wrapped(op, &root, &doc, &entity, &payload_key, &field, true)
            }
            None => {
                let tree = self.level(&op.name, &root, &doc, &op.fields);
                (tree, ResponseShape::Plain)
            }
        };

        if op.is_async {
            for (wire, ty) in [("jobid", MappedType::Uuid), ("jobstatus", MappedType::Int32)] {
                if !tree.def.has_field(wire) {
                    tree.def.fields.push(FieldDef {
                        wire: wire.to_string(),
                        ident: wire.to_string(),
                        ty,
                        doc: String::new(),
                    });
                }
            }
        }

        OperationTypes {
            operation: op.name.clone(),
            root,
            shape,
            tree,
        }
    }

    /// Builds a wrapper root around an entity built from the operation's
    /// response fields.
    #[allow(clippy::too_many_arguments)]
    fn wrapped(
        &mut self,
        op: &Operation,
        root: &str,
        doc: &str,
        entity_candidate: &str,
        payload_key: &str,
        field: &str,
        many: bool,
    ) -> (TypeTree, ResponseShape) {
        let entity = self.registry.claim(entity_candidate);
        let child = self.level(&op.name, &entity, doc, &op.fields);

        let mut fields = Vec::new();
        if many {
            fields.push(FieldDef {
                wire: "count".to_string(),
                ident: "count".to_string(),
                ty: MappedType::Int64,
                doc: String::new(),
            });
        }
        fields.push(FieldDef {
            wire: payload_key.to_string(),
            ident: field.to_string(),
            ty: MappedType::Entity {
                name: entity.clone(),
                many,
            },
            doc: String::new(),
        });

        let tree = TypeTree {
            def: TypeDef {
                name: root.to_string(),
                doc: doc.to_string(),
                fields,
            },
            children: vec![child],
        };

        let shape = if many {
            ResponseShape::List {
                entity,
                field: field.to_string(),
            }
        } else {
            ResponseShape::Object {
                entity,
                field: field.to_string(),
            }
        };
        (tree, shape)
    }

    /// Builds one structural level and, recursively, its nested levels.
    fn level(&mut self, op: &str, name: &str, doc: &str, fields: &[Field]) -> TypeTree {
        let mut seen_wire = BTreeSet::new();
        let mut seen_ident = BTreeSet::new();
        let mut defs = Vec::new();
        let mut children = Vec::new();

        for field in fields {
            if !seen_wire.insert(field.name.as_str()) {
                continue;
            }

            let ty = match self.mapper.override_for(op, &field.name, &field.wire_type) {
                Some(ty) => ty,
                None if field.is_nested() => {
                    let many = matches!(
                        field.wire_type.to_ascii_lowercase().as_str(),
                        "list" | "set"
                    );
                    let nested = if is_canonical_field(&field.name) {
                        match self.registry.claim_canonical(&canonical_type_name(&field.name)) {
                            Canonical::Claimed(nested) => {
                                let nested_doc = format!("`{}` entry.", field.name);
                                children.push(self.level(op, &nested, &nested_doc, &field.fields));
                                nested
                            }
                            Canonical::Shared(nested) => nested,
                        }
                    } else {
                        let nested = self
                            .registry
                            .claim(&format!("{name}{}", type_name(&field.name)));
                        let nested_doc = format!("`{}` of [`{}`].", field.name, name);
                        children.push(self.level(op, &nested, &nested_doc, &field.fields));
                        nested
                    };
                    MappedType::Entity { name: nested, many }
                }
                None => TypeMapper::generic(&field.wire_type),
            };

            let base = field_ident(&field.name);
            let mut ident = base.clone();
            let mut marker = 2;
            while !seen_ident.insert(ident.clone()) {
                ident = format!("{base}{marker}");
                marker += 1;
            }

            defs.push(FieldDef {
                wire: field.name.clone(),
                ident,
                ty,
                doc: field.description.clone(),
            });
        }

        TypeTree {
            def: TypeDef {
                name: name.to_string(),
                doc: doc.to_string(),
                fields: defs,
            },
            children,
        }
    }
}

/// Derives the `(singular, plural)` entity names of a list operation.
///
/// `listVirtualMachines` gives `("VirtualMachine", "VirtualMachines")`.
/// Exceptions without a `list` prefix drop their leading verb instead:
/// `registerTemplate` gives `("Template", "Template")`.
pub fn list_entity(op: &str) -> (String, String) {
    let plural = match op.strip_prefix("list") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => {
            let verb_end = op.find(|c: char| c.is_uppercase()).unwrap_or(0);
            op[verb_end..].to_string()
        }
    };
    let plural = type_name(&plural);
    (singular(&plural), plural)
}

/// Method name fragment for an entity: `VirtualMachine` → `virtual_machine`.
pub fn entity_fragment(entity: &str) -> String {
    to_snake_case(entity)
}
