#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_script_is_end() {
    let script = Script::empty();
    assert_eq!(script.code(), &[Opcode::End.as_byte()]);
    assert_eq!(script, Script::default());
    assert!(Script::new().is_empty());
}

#[test]
fn test_constants_are_deduplicated() {
    let mut script = Script::new();
    assert_eq!(script.add_constant(Value::from("x")), Some(0));
    assert_eq!(script.add_constant(Value::from(1.0)), Some(1));
    assert_eq!(script.add_constant(Value::from("x")), Some(0));
    assert_eq!(script.add_constant(Value::from(1)), Some(1));
    assert_eq!(script.constants().len(), 2);
}

#[test]
fn test_constant_pool_is_limited_to_256() {
    let mut script = Script::new();
    for i in 0..256 {
        assert_eq!(script.add_constant(Value::from(i)), Some(i as u8));
    }
    assert_eq!(script.add_constant(Value::from(256)), None);
    assert_eq!(script.add_constant(Value::from(255)), Some(255));
}

#[test]
fn test_patch_jump_writes_big_endian_displacement() {
    let mut script = Script::new();
    let operand = script.write_jump(Opcode::JumpIfFalse);
    assert_eq!(operand, 1);
    for _ in 0..300 {
        script.write(Opcode::Null);
    }
    script.patch_jump(operand).unwrap();
    assert_eq!(&script.code()[1..3], &300i16.to_be_bytes());
}

#[test]
fn test_patch_jump_rejects_long_bodies() {
    let mut script = Script::new();
    let operand = script.write_jump(Opcode::Jump);
    for _ in 0..=i16::MAX as usize {
        script.write(Opcode::Pop);
    }
    assert_eq!(
        script.patch_jump(operand),
        Err(JumpOutOfRange {
            distance: i16::MAX as usize + 1
        })
    );
}

#[test]
fn test_disassemble() {
    let mut script = Script::new();
    let text = script.add_constant(Value::from("Hi ")).unwrap();
    script.write_with(Opcode::ConstantAppend, text);
    let player = script.add_constant(Value::from("player")).unwrap();
    let name = script.add_constant(Value::from("name")).unwrap();
    script.write(Opcode::VariableGetAppend);
    script.write_byte(player);
    script.write_byte(name);
    script.write_with(Opcode::Section, 1);
    script.write(Opcode::True);
    let jump = script.write_jump(Opcode::JumpIfFalse);
    script.write(Opcode::Pop);
    script.patch_jump(jump).unwrap();
    script.write_with(Opcode::Variable, player);
    script.write_with(Opcode::CallAppend, 1);
    script.write(Opcode::Append);
    script.write(Opcode::End);

    let expected = "\
   0 ConstantAppend      0 'Hi '
   2 VariableGetAppend   1.2   'player.name'
   5 Section             1
   7 True
   8 JumpIfFalse         9 -> 12
  11 Pop
  12 Variable            1 'player'
  14 CallAppend          1 argument
  16 Append
  17 End
";
    assert_eq!(script.disassemble(), expected);
    assert_eq!(script.to_string(), expected);
}

#[test]
fn test_disassemble_plural_arguments() {
    let mut script = Script::new();
    script.write_with(Opcode::Call, 2);
    assert_eq!(script.disassemble(), "   0 Call                2 arguments\n");
}

#[test]
fn test_disassemble_malformed_code() {
    let mut script = Script::new();
    script.write_byte(0xff);
    script.write(Opcode::Constant);
    assert_eq!(
        script.disassemble(),
        "   0 <unknown 0xff>\n   1 Constant <truncated>\n"
    );
}
