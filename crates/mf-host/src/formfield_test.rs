use super::*;
use serde_json::json;

fn field(yaml: &str) -> FieldDef {
    serde_yaml::from_str(yaml).unwrap()
}

fn derive(yaml: &str) -> FormFieldRepr {
    form_field(&field(yaml)).expect("field should have a form representation")
}

#[test]
fn test_char_field_text_input_with_length_attrs() {
    let f = derive("name: title\ntype: CharField\nmax_length: 150\nmin_length: 30");
    assert_eq!(f.class, "CharField");
    assert_eq!(f.widget.class, "TextInput");
    assert_eq!(f.widget.input_type.as_deref(), Some("text"));
    assert_eq!(f.widget.attrs.get("maxlength"), Some(&json!("150")));
    assert_eq!(f.widget.attrs.get("minlength"), Some(&json!("30")));
    assert_eq!(f.widget.choices, WidgetChoices::None);
}

#[test]
fn test_text_field_textarea() {
    let f = derive("name: body\ntype: TextField");
    assert_eq!(f.class, "CharField");
    assert_eq!(f.widget.class, "Textarea");
    assert!(f.widget.input_type.is_none());
    assert_eq!(f.widget.attrs.get("rows"), Some(&json!("10")));
    assert_eq!(f.widget.attrs.get("cols"), Some(&json!("40")));
}

#[test]
fn test_input_widget_table() {
    for (ty, class, widget, input_type) in [
        ("EmailField", "EmailField", "EmailInput", Some("email")),
        ("URLField", "URLField", "URLInput", Some("url")),
        ("IntegerField", "IntegerField", "NumberInput", Some("number")),
        ("BigIntegerField", "IntegerField", "NumberInput", Some("number")),
        ("FloatField", "FloatField", "NumberInput", Some("number")),
        ("BooleanField", "BooleanField", "CheckboxInput", Some("checkbox")),
        ("DateField", "DateField", "DateInput", Some("text")),
        ("DateTimeField", "DateTimeField", "DateTimeInput", Some("text")),
        ("TimeField", "TimeField", "TimeInput", Some("text")),
        ("FileField", "FileField", "ClearableFileInput", Some("file")),
        ("ImageField", "ImageField", "ClearableFileInput", Some("file")),
        ("ArrayField", "SimpleArrayField", "TextInput", Some("text")),
    ] {
        let f = derive(&format!("name: x\ntype: {ty}"));
        assert_eq!(f.class, class, "{ty}");
        assert_eq!(f.widget.class, widget, "{ty}");
        assert_eq!(f.widget.input_type.as_deref(), input_type, "{ty}");
    }
}

#[test]
fn test_relation_fields_use_lazy_choices() {
    for (ty, class, widget, multiple) in [
        ("ForeignKey", "ModelChoiceField", "Select", false),
        ("OneToOneField", "ModelChoiceField", "Select", false),
        ("ManyToManyField", "ModelMultipleChoiceField", "SelectMultiple", true),
        ("TreeForeignKey", "TreeNodeChoiceField", "Select", false),
        (
            "TreeManyToManyField",
            "TreeNodeMultipleChoiceField",
            "SelectMultiple",
            true,
        ),
    ] {
        let f = derive(&format!("name: rel\ntype: {ty}\nto: Category"));
        assert_eq!(f.class, class, "{ty}");
        assert_eq!(f.widget.class, widget, "{ty}");
        assert_eq!(f.widget.choices, WidgetChoices::Lazy, "{ty}");
        assert_eq!(f.widget.allow_multiple_selected, Some(multiple), "{ty}");
    }
}

#[test]
fn test_choices_become_typed_choice_field_with_blank() {
    let f = derive("name: size\ntype: CharField\nmax_length: 1\nchoices: [[s, Small], [l, Large]]");
    assert_eq!(f.class, "TypedChoiceField");
    assert_eq!(f.widget.class, "Select");
    assert_eq!(
        f.widget.choices,
        WidgetChoices::Static(vec![
            Choice::new("", BLANK_CHOICE_LABEL),
            Choice::new("s", "Small"),
            Choice::new("l", "Large"),
        ])
    );
    // Length limits belong to text inputs only
    assert!(f.widget.attrs.get("maxlength").is_none());
}

#[test]
fn test_choices_with_default_skip_blank() {
    let f = derive("name: size\ntype: CharField\nchoices: [[s, Small]]\ndefault: s");
    assert_eq!(
        f.widget.choices,
        WidgetChoices::Static(vec![Choice::new("s", "Small")])
    );
}

#[test]
fn test_nullable_boolean_select() {
    for yaml in [
        "name: flag\ntype: NullBooleanField",
        "name: flag\ntype: BooleanField\nnull: true",
    ] {
        let f = derive(yaml);
        assert_eq!(f.class, "NullBooleanField");
        assert_eq!(f.widget.class, "NullBooleanSelect");
        match &f.widget.choices {
            WidgetChoices::Static(choices) => assert_eq!(choices.len(), 3),
            other => panic!("unexpected choices {other:?}"),
        }
    }
}

#[test]
fn test_no_form_field_for_auto_and_non_editable() {
    assert!(form_field(&field("name: id\ntype: AutoField")).is_none());
    assert!(form_field(&field("name: id\ntype: BigAutoField")).is_none());
    assert!(form_field(&field("name: blob\ntype: BinaryField")).is_none());
    assert!(form_field(&field("name: slug\ntype: SlugField\neditable: false")).is_none());
}

#[test]
fn test_number_input_attrs() {
    let f = derive("name: qty\ntype: PositiveIntegerField");
    assert_eq!(f.widget.attrs.get("min"), Some(&json!(0)));
    let f = derive("name: ratio\ntype: FloatField");
    assert_eq!(f.widget.attrs.get("step"), Some(&json!("any")));
    let f = derive("name: price\ntype: DecimalField\ndecimal_places: 2");
    assert_eq!(f.widget.attrs.get("step"), Some(&json!("0.01")));
}

#[test]
fn test_decimal_step() {
    assert_eq!(decimal_step(None), "any");
    assert_eq!(decimal_step(Some(0)), "1");
    assert_eq!(decimal_step(Some(1)), "0.1");
    assert_eq!(decimal_step(Some(3)), "0.001");
    assert_eq!(decimal_step(Some(8)), "1E-8");
}

#[test]
fn test_override_widget_keeps_field_attrs() {
    let f = derive(
        r#"
name: body
type: CharField
max_length: 500
form_field:
  widget: Textarea
  attrs: { rows: "4" }
"#,
    );
    assert_eq!(f.class, "CharField");
    assert_eq!(f.widget.class, "Textarea");
    assert_eq!(f.widget.attrs.get("rows"), Some(&json!("4")));
    assert_eq!(f.widget.attrs.get("cols"), Some(&json!("40")));
    assert_eq!(f.widget.attrs.get("maxlength"), Some(&json!("500")));
}

#[test]
fn test_override_hidden_widget_drops_length_attrs() {
    let f = derive("name: token\ntype: CharField\nmax_length: 32\nform_field: { widget: HiddenInput }");
    assert_eq!(f.widget.input_type.as_deref(), Some("hidden"));
    assert!(f.widget.attrs.is_empty());
}

#[test]
fn test_override_unknown_widget_has_no_input_type() {
    let f = derive("name: colour\ntype: CharField\nform_field: { widget: ColorPicker }");
    assert_eq!(f.widget.class, "ColorPicker");
    assert!(f.widget.input_type.is_none());
}

#[test]
fn test_label_and_required() {
    let def = field("name: first_name\ntype: CharField");
    assert_eq!(label(&def), "First name");
    assert!(required(&def));

    let def = field("name: nick\ntype: CharField\nblank: true\nverbose_name: nickname");
    assert_eq!(label(&def), "Nickname");
    assert!(!required(&def));

    let def = field("name: active\ntype: BooleanField");
    assert!(!required(&def));

    let def = field("name: code\ntype: CharField\nform_field: { label: Promo code, required: false }");
    assert_eq!(label(&def), "Promo code");
    assert!(!required(&def));
}
