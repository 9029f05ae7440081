//! YAML-backed host registry
//!
//! Every directory directly under a model path is a namespace; every
//! `.yml`/`.yaml` file inside it defines one model. Namespaces and models
//! are ordered by directory and file name so listings are stable.

use crate::error::{HostError, HostResult};
use crate::formfield;
use crate::schema::{DefaultDef, FieldDef, ModelFieldType, ModelFile};
use chrono::Utc;
use mf_core::{
    AttrResult, AttributeDerivationError, CallableOutput, Choice, Config, FormFieldRepr,
    HostField, HostModel, HostRegistry, InitialCallable, InitialValue, InternalType,
    ModelDescriptor,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Registry of models loaded from YAML files
#[derive(Default)]
pub struct YamlRegistry {
    namespaces: Vec<(String, Vec<ModelDescriptor>)>,
}

impl YamlRegistry {
    /// Load every namespace found under the configured model paths of a
    /// project rooted at `root`
    pub fn from_config(root: &Path, config: &Config) -> HostResult<Self> {
        Self::load(&config.model_paths_absolute(root))
    }

    /// Load every namespace found under `model_paths`.
    ///
    /// A namespace directory present under several paths merges their
    /// models; the same model defined twice in one namespace is an error.
    pub fn load(model_paths: &[PathBuf]) -> HostResult<Self> {
        let mut registry = Self::default();

        for root in model_paths {
            if !root.is_dir() {
                return Err(HostError::ModelPathNotFound {
                    path: root.display().to_string(),
                });
            }
            for dir in sorted_entries(root, |p| p.is_dir())? {
                let Some(namespace) = dir.file_name().and_then(|n| n.to_str()) else {
                    log::warn!("Skipping non UTF-8 directory {}", dir.display());
                    continue;
                };
                registry.load_namespace(namespace, &dir)?;
            }
        }

        Ok(registry)
    }

    fn load_namespace(&mut self, namespace: &str, dir: &Path) -> HostResult<()> {
        let index = match self.namespaces.iter().position(|(n, _)| n == namespace) {
            Some(index) => index,
            None => {
                self.namespaces.push((namespace.to_string(), Vec::new()));
                self.namespaces.len() - 1
            }
        };

        let files = sorted_entries(dir, |p| {
            p.is_file() && p.extension().is_some_and(|e| e == "yml" || e == "yaml")
        })?;

        for path in files {
            let model = YamlModel::load(namespace, &path)?;
            let models = &mut self.namespaces[index].1;
            if models.iter().any(|m| m.name() == model.name()) {
                return Err(HostError::DuplicateModel {
                    namespace: namespace.to_string(),
                    model: model.name().to_string(),
                });
            }
            log::debug!("Loaded model {}.{} from {}", namespace, model.name(), path.display());
            models.push(Arc::new(model));
        }
        Ok(())
    }

    /// Total number of loaded models
    pub fn model_count(&self) -> usize {
        self.namespaces.iter().map(|(_, models)| models.len()).sum()
    }
}

impl HostRegistry for YamlRegistry {
    fn namespaces(&self) -> Vec<&str> {
        self.namespaces.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn models(&self, namespace: &str) -> Option<Vec<ModelDescriptor>> {
        self.namespaces
            .iter()
            .find(|(n, _)| n == namespace)
            .map(|(_, models)| models.clone())
    }
}

impl std::fmt::Debug for YamlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YamlRegistry")
            .field("namespaces", &HostRegistry::namespaces(self))
            .field("models", &self.model_count())
            .finish()
    }
}

/// Directory entries matching `keep`, sorted by path
fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> HostResult<Vec<PathBuf>> {
    let io_err = |source| HostError::IoWithPath {
        path: dir.display().to_string(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// A model defined by one YAML file
#[derive(Debug)]
pub struct YamlModel {
    name: String,
    verbose_name: Option<String>,
    fields: Vec<YamlField>,
}

impl YamlModel {
    /// Read and validate the model file at `path`
    pub fn load(namespace: &str, path: &Path) -> HostResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HostError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: ModelFile =
            serde_yaml::from_str(&content).map_err(|e| HostError::ModelParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::from_file(namespace, file)
    }

    /// Build a model from an already parsed definition
    pub fn from_file(namespace: &str, file: ModelFile) -> HostResult<Self> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(file.fields.len());
        for def in file.fields {
            if !seen.insert(def.name.clone()) {
                return Err(HostError::DuplicateField {
                    model: file.name,
                    field: def.name,
                });
            }
            fields.push(YamlField::new(namespace, &file.name, def)?);
        }
        Ok(Self {
            name: file.name,
            verbose_name: file.verbose_name,
            fields,
        })
    }

    /// Human-readable model name
    pub fn verbose_name(&self) -> &str {
        self.verbose_name.as_deref().unwrap_or(&self.name)
    }
}

impl HostModel for YamlModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<&dyn HostField> {
        self.fields.iter().map(|f| f as &dyn HostField).collect()
    }
}

/// A field of a [`YamlModel`] with its form field derived at load time
#[derive(Debug)]
pub struct YamlField {
    def: FieldDef,
    related_model: Option<String>,
    form: Option<FormFieldRepr>,
    base: Option<Box<YamlField>>,
}

impl YamlField {
    fn new(namespace: &str, model: &str, mut def: FieldDef) -> HostResult<Self> {
        let invalid = |def: &FieldDef, reason: &str| HostError::InvalidField {
            model: model.to_string(),
            field: def.name.clone(),
            reason: reason.to_string(),
        };

        let related_model = match (&def.to, def.field_type.is_relation()) {
            (Some(to), true) => Some(qualify(namespace, to)),
            (None, true) => return Err(invalid(&def, "relation fields need a 'to' target")),
            (Some(_), false) => return Err(invalid(&def, "'to' is only valid on relation fields")),
            (None, false) => None,
        };

        let base = match (def.base_field.take(), def.field_type) {
            (Some(base), ModelFieldType::ArrayField) => {
                Some(Box::new(Self::new(namespace, model, *base)?))
            }
            (None, ModelFieldType::ArrayField) => {
                return Err(invalid(&def, "ArrayField needs a 'base_field'"))
            }
            (Some(_), _) => return Err(invalid(&def, "'base_field' is only valid on ArrayField")),
            (None, _) => None,
        };

        if !def.field_type.has_length() && def.max_length.is_some() {
            log::warn!(
                "{}.{}: max_length has no effect on {:?}",
                model,
                def.name,
                def.field_type
            );
        }

        Ok(Self {
            form: formfield::form_field(&def),
            related_model,
            base,
            def,
        })
    }

    /// The field definition as written
    pub fn definition(&self) -> &FieldDef {
        &self.def
    }

    /// Form attributes exist only for fields with a form representation
    fn require_form(&self, attribute: &'static str) -> AttrResult<&FormFieldRepr> {
        self.form.as_ref().ok_or_else(|| {
            AttributeDerivationError::new(
                &self.def.name,
                attribute,
                "field has no form representation",
            )
        })
    }
}

/// `Model` becomes `namespace.Model`; qualified targets are kept
fn qualify(namespace: &str, target: &str) -> String {
    if target.contains('.') {
        target.to_string()
    } else {
        format!("{namespace}.{target}")
    }
}

impl HostField for YamlField {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn internal_type(&self) -> InternalType {
        self.def.field_type.internal_type()
    }

    fn is_relation(&self) -> bool {
        self.def.field_type.is_relation()
    }

    fn related_model(&self) -> Option<String> {
        self.related_model.clone()
    }

    fn min_length(&self) -> Option<u32> {
        self.def.min_length
    }

    fn max_length(&self) -> Option<u32> {
        self.def.max_length
    }

    fn choices(&self) -> Vec<Choice> {
        self.def.declared_choices()
    }

    fn base_field(&self) -> Option<&dyn HostField> {
        self.base.as_deref().map(|f| f as &dyn HostField)
    }

    fn form_field(&self) -> Option<FormFieldRepr> {
        self.form.clone()
    }

    fn form_label(&self) -> AttrResult<String> {
        self.require_form("label")?;
        Ok(formfield::label(&self.def))
    }

    fn form_required(&self) -> AttrResult<bool> {
        self.require_form("required")?;
        Ok(formfield::required(&self.def))
    }

    fn form_initial(&self) -> AttrResult<InitialValue> {
        self.require_form("initial")?;
        match &self.def.default {
            None => Ok(InitialValue::Unset),
            Some(DefaultDef::Value(value)) => Ok(InitialValue::Static(value.clone())),
            Some(DefaultDef::Callable { callable }) => initial_callable(callable)
                .map(InitialValue::Callable)
                .ok_or_else(|| {
                    AttributeDerivationError::new(
                        &self.def.name,
                        "initial",
                        format!("unknown callable '{callable}'"),
                    )
                }),
        }
    }

    fn form_help_text(&self) -> AttrResult<String> {
        self.require_form("help_text")?;
        Ok(self.def.help_text.clone().unwrap_or_default())
    }
}

/// Factories a model file may name as its default
fn initial_callable(name: &str) -> Option<InitialCallable> {
    let callable = match name {
        "now" => InitialCallable::new(name, || CallableOutput::DateTime(Utc::now())),
        "today" => InitialCallable::new(name, || {
            CallableOutput::Value(Utc::now().date_naive().format("%Y-%m-%d").to_string().into())
        }),
        "uuid4" => InitialCallable::new(name, || {
            CallableOutput::Value(uuid::Uuid::new_v4().to_string().into())
        }),
        _ => return None,
    };
    Some(callable)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
