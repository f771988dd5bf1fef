use l5xtree::color::{Rgb, depth_background};
use l5xtree::model::{IoEntry, ModuleRecord};
use l5xtree::tree::print::render_ascii;
use l5xtree::tree::{IoTree, NodeId, build_tree};
use l5xtree::{LinkOptions, Project};

fn entry(hw: &str, param: &str, comment: &str) -> IoEntry {
    IoEntry {
        hardware_address: hw.into(),
        hardware_comment: format!("{} comment", hw),
        parameter_path: param.into(),
        parameter_comment: comment.into(),
    }
}

fn module(hw: &str, inputs: Vec<IoEntry>, outputs: Vec<IoEntry>) -> ModuleRecord {
    ModuleRecord {
        hardware_address: hw.into(),
        hardware_comment: format!("{} name", hw),
        inputs,
        outputs,
    }
}

fn hardware_of(tree: &IoTree, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| tree.node(id).unwrap().hardware().to_string())
        .collect()
}

#[test]
fn end_to_end_single_module() {
    let xml = r#"<Root>
  <Modules>
    <Module Name="Flow" ParentModule="Local">
      <Ports><Port Address="1"/></Ports>
      <InputTag>
        <Comment Operand=".3">Meter</Comment>
        <Comment Operand=".4">Spare</Comment>
      </InputTag>
    </Module>
  </Modules>
  <ParameterConnection EndPoint1="Local:1:I.3" EndPoint2="\ProgramA.TagX"/>
  <Program Name="ProgramA"><Tags><Tag Name="TagX"><Description>Flow Rate</Description></Tag></Tags></Program>
</Root>"#;
    let project = Project::parse_str(xml, "plant.L5X", &LinkOptions::default()).unwrap();
    let tree = project.tree();

    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.fields[0], "plant.L5X");
    assert_eq!(root.depth, 0);
    assert_eq!(root.children().len(), 1);

    let group = root.children()[0];
    assert_eq!(tree.node(group).unwrap().fields[..2], ["Local:1", "Flow"]);
    assert_eq!(hardware_of(tree, tree.children(group)), vec!["Inputs", "Outputs"]);

    let inputs = tree.child(group, 0).unwrap();
    let outputs = tree.child(group, 1).unwrap();
    assert!(tree.children(outputs).is_empty());
    let leaves: Vec<[String; 4]> = tree
        .children(inputs)
        .iter()
        .map(|&id| tree.node(id).unwrap().fields.clone())
        .collect();
    assert_eq!(
        leaves,
        vec![
            [
                "Local:1:I.3".to_string(),
                "Meter".to_string(),
                "\\ProgramA.TagX".to_string(),
                "Flow Rate".to_string()
            ],
            [
                "Local:1:I.4".to_string(),
                "Spare".to_string(),
                String::new(),
                String::new()
            ],
        ]
    );
    assert!(tree.children(inputs).iter().all(|&id| tree.node(id).unwrap().depth == 3));
}

#[test]
fn modules_without_io_contribute_no_node() {
    let modules = vec![
        module("R:0", vec![], vec![]),
        module("R:1", vec![], vec![entry("R:1:O.0", "", "")]),
    ];
    let tree = build_tree("doc", &modules, '.');
    let groups = tree.children(tree.root());
    assert_eq!(hardware_of(&tree, groups), vec!["R:1"]);
    // Both direction nodes exist even though Inputs is empty.
    assert_eq!(hardware_of(&tree, tree.children(groups[0])), vec!["Inputs", "Outputs"]);
}

#[test]
fn three_segment_entries_nest_under_matching_leaf_anywhere() {
    let modules = vec![
        module(
            "R:1",
            vec![
                // Listed before its owner; the owner pass runs first.
                entry("R:1:I.Data.0", "\\P.Bit0", ""),
                entry("R:1:I.Data", "\\P.Word", "word"),
            ],
            vec![],
        ),
        module(
            "R:2",
            vec![],
            vec![
                // Owner lives under the other module.
                entry("R:1:I.Data.7", "", ""),
                // No leaf named R:2:O.Missing anywhere: dropped.
                entry("R:2:O.Missing.1", "", ""),
                // One segment: dropped.
                entry("R:2:O", "", ""),
            ],
        ),
    ];
    let tree = build_tree("doc", &modules, '.');

    let owner = tree.find_hardware("R:1:I.Data").unwrap();
    assert_eq!(tree.node(owner).unwrap().depth, 3);
    assert_eq!(
        hardware_of(&tree, tree.children(owner)),
        vec!["R:1:I.Data.0", "R:1:I.Data.7"]
    );
    for &child in tree.children(owner) {
        assert_eq!(tree.node(child).unwrap().depth, 4);
        assert_eq!(tree.parent(child), Some(owner));
    }
    assert_eq!(tree.row(tree.children(owner)[1]), 1);

    let r2 = tree.child(tree.root(), 1).unwrap();
    let r2_outputs = tree.child(r2, 1).unwrap();
    assert!(tree.children(r2_outputs).is_empty());
    assert!(tree.find_hardware("R:2:O.Missing.1").is_none());
    assert!(tree.find_hardware("R:2:O").is_none());
    // root + 2 groups + 4 direction nodes + 1 leaf + 2 nested leaves
    assert_eq!(tree.len(), 10);
}

#[test]
fn nested_entry_attaches_to_first_leaf_with_that_address() {
    let modules = vec![
        module("A", vec![entry("X:1:I.Dup", "", "")], vec![]),
        module("B", vec![entry("X:1:I.Dup", "", "")], vec![entry("X:1:I.Dup.0", "", "")]),
    ];
    let tree = build_tree("doc", &modules, '.');
    let first = tree.find_hardware("X:1:I.Dup").unwrap();
    assert_eq!(hardware_of(&tree, tree.children(first)), vec!["X:1:I.Dup.0"]);
}

#[test]
fn pipeline_is_idempotent() {
    let xml = r#"<Root>
  <Module Name="M" ParentModule="Local"><Ports><Port Address="4"/></Ports>
    <InputTag><Comment Operand=".Data">Word</Comment><Comment Operand=".Data.2">Bit</Comment></InputTag>
    <OutputTag><Comment Operand=".1">Out</Comment></OutputTag>
  </Module>
  <ParameterConnection EndPoint1="\Main.Word" EndPoint2="Local:4:I.Data"/>
</Root>"#;
    let a = Project::parse_str(xml, "x.L5X", &LinkOptions::default()).unwrap();
    let b = Project::parse_str(xml, "x.L5X", &LinkOptions::default()).unwrap();
    assert_eq!(a.tree(), b.tree());
    assert_eq!(a.tree().nested(a.tree().root()), b.tree().nested(b.tree().root()));
    assert_eq!(a.modules(), b.modules());
}

#[test]
fn colour_state_overrides_depth_colour() {
    let modules = vec![module("R:1", vec![entry("R:1:I.0", "", "")], vec![])];
    let mut tree = build_tree("doc", &modules, '.');
    let leaf = tree.find_hardware("R:1:I.0").unwrap();
    assert_eq!(tree.node(leaf).unwrap().background(), depth_background(3));

    tree.set_color(Some(Rgb(1, 2, 3)));
    assert!(
        tree.descendants(tree.root())
            .all(|id| tree.node(id).unwrap().background() == Some(Rgb(1, 2, 3)))
    );
    tree.set_color(None);
    assert_eq!(tree.node(tree.root()).unwrap().background(), depth_background(0));
}

#[test]
fn ascii_rendering_shows_every_node() {
    let modules = vec![module("R:1", vec![entry("R:1:I.0", "\\P.T", "")], vec![])];
    let tree = build_tree("doc.L5X", &modules, '.');
    let text = render_ascii(&tree);
    let expected = "\
doc.L5X
└─ R:1 | R:1 name
   ├─ Inputs
   │  └─ R:1:I.0 | R:1:I.0 comment | \\P.T
   └─ Outputs
";
    assert_eq!(text, expected);
}

#[test]
fn json_view_nests_children() {
    let modules = vec![module("R:1", vec![entry("R:1:I.0", "", "")], vec![])];
    let tree = build_tree("doc", &modules, '.');
    let value = serde_json::to_value(tree.nested(tree.root())).unwrap();
    assert_eq!(value["fields"][0], "doc");
    assert_eq!(value["children"][0]["children"][0]["children"][0]["fields"][0], "R:1:I.0");
    assert_eq!(value["children"][0]["children"][0]["children"][0]["depth"], 3);
}

#[test]
fn parsed_colour_overrides_depth_background_in_json() {
    let modules = vec![module("R:1", vec![entry("R:1:I.0", "", "")], vec![])];
    let mut tree = build_tree("doc", &modules, '.');
    let value = serde_json::to_value(tree.nested(tree.root())).unwrap();
    assert_eq!(value["background"], serde_json::json!([157, 159, 85]));

    let color: Rgb = "#ff8000".parse().unwrap();
    tree.set_color(Some(color));
    let value = serde_json::to_value(tree.nested(tree.root())).unwrap();
    let leaf = &value["children"][0]["children"][0]["children"][0];
    assert_eq!(leaf["background"], serde_json::json!([255, 128, 0]));
    assert!("not-a-colour".parse::<Rgb>().is_err());
}
