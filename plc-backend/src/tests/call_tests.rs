//! Call sites and operator evaluation order

use super::{compile, procedure_body, stack_movement};
use indoc::indoc;
use plc_codegen::{AsmInst, Reg};
use pretty_assertions::assert_eq;

fn count(code: &[AsmInst], wanted: &AsmInst) -> usize {
    code.iter().filter(|inst| *inst == wanted).count()
}

#[test]
fn test_each_argument_pushed_and_dropped() {
    let code = compile(indoc! {"
        proc f(a, b, c) begin end

        proc main()
        var x
        begin
            f(1, x + 1, -x);
        end
    "});
    let body = procedure_body(&code, "main");
    let call_at = body
        .iter()
        .position(|inst| *inst == AsmInst::Call("p_f".to_string()))
        .unwrap();

    // body[0] is the prologue; then the link register plus three arguments
    let pushes = count(&body[1..call_at], &AsmInst::AddI(Reg::Sp, Reg::Sp, 1));
    assert_eq!(pushes, 4);
    assert_eq!(body[call_at + 1], AsmInst::AddI(Reg::Sp, Reg::Sp, -3));
    assert_eq!(body[call_at + 3], AsmInst::Load(Reg::Link, Reg::Sp, 0));
    assert_eq!(stack_movement(&body), 0);
}

#[test]
fn test_call_inside_argument_keeps_stack_balanced() {
    let code = compile(indoc! {"
        proc g(v) begin write(v); end
        proc f(a, b) begin end

        proc main()
        var x
        begin
            f(x, 2 + g(x));
        end
    "});
    let body = procedure_body(&code, "main");
    assert_eq!(stack_movement(&body), 0);
    assert_eq!(count(&body, &AsmInst::AddI(Reg::Sp, Reg::Sp, -2)), 1);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    for op in ["and", "or", "xor"] {
        let source = format!(
            "proc side() begin write(7); end\nproc main() begin if 0 {} side() then write(1); end end",
            op
        );
        let code = compile(&source);
        let body = procedure_body(&code, "main");
        assert!(
            body.contains(&AsmInst::Call("p_side".to_string())),
            "{} must evaluate its right operand",
            op
        );
        let combine = match op {
            "and" => AsmInst::And(Reg::X(3), Reg::X(3), Reg::X(4)),
            "or" => AsmInst::Or(Reg::X(3), Reg::X(3), Reg::X(4)),
            _ => AsmInst::Xor(Reg::X(3), Reg::X(3), Reg::X(4)),
        };
        assert!(body.contains(&combine));
    }
}

#[test]
fn test_greater_is_less_with_operands_swapped() {
    let greater = compile("proc main() var a, b begin write(a > b); end");
    let less = compile("proc main() var a, b begin write(b < a); end");

    let greater = procedure_body(&greater, "main");
    let less = procedure_body(&less, "main");
    assert!(greater.contains(&AsmInst::Slt(Reg::X(3), Reg::X(4), Reg::X(3))));
    assert!(less.contains(&AsmInst::Slt(Reg::X(3), Reg::X(3), Reg::X(4))));

    // a > b loads a first, b < a loads b first
    assert_eq!(greater[1], AsmInst::AddI(Reg::X(3), Reg::Sp, -1));
    assert_eq!(less[1], AsmInst::AddI(Reg::X(3), Reg::Sp, -2));
}

#[test]
fn test_recursive_procedure() {
    let code = compile(indoc! {"
        proc countdown(n)
        begin
            if n then
                write(n);
                countdown(n - 1);
            end
        end

        proc main() begin countdown(3); end
    "});
    let body = procedure_body(&code, "countdown");
    assert!(body.contains(&AsmInst::Call("p_countdown".to_string())));
    assert_eq!(stack_movement(&body), 0);

    // the recursive argument is computed with the link register pushed
    let offsets: Vec<i32> = body
        .iter()
        .filter_map(|inst| match inst {
            AsmInst::AddI(Reg::X(3), Reg::Sp, imm) => Some(*imm),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![-1, -1, -2]);
}
