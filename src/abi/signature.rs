//! Text signature parsing.

use alloy::json_abi::{Function, Param};

use crate::error::{AppError, Result};

/// Build an ABI function from a text signature such as `approve(address,uint256)`.
///
/// Tuple arguments are expanded into components. The output is always a
/// single `uint256`, since text signatures carry no return types.
pub fn parse_function(text_signature: &str) -> Result<Function> {
    let text_signature = text_signature.trim();
    if !text_signature.ends_with(')') || !text_signature.contains('(') {
        return Err(AppError::Parse(format!("Invalid text signature: {}", text_signature)));
    }

    let mut function = Function::parse(text_signature).map_err(|e| {
        AppError::Parse(format!("Invalid text signature {}: {}", text_signature, e))
    })?;

    function.outputs = vec![Param {
        ty: "uint256".to_string(),
        name: String::new(),
        components: Vec::new(),
        internal_type: None,
    }];

    Ok(function)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_signature() {
        let function = parse_function("approve(address,uint256)").unwrap();
        assert_eq!(function.name, "approve");
        assert_eq!(function.inputs.len(), 2);
        assert_eq!(function.inputs[0].ty, "address");
        assert_eq!(function.inputs[1].ty, "uint256");
        assert_eq!(function.outputs.len(), 1);
        assert_eq!(function.outputs[0].ty, "uint256");
        assert_eq!(function.signature(), "approve(address,uint256)");
    }

    #[test]
    fn test_parse_no_arguments() {
        let function = parse_function("totalSupply()").unwrap();
        assert!(function.inputs.is_empty());
        assert_eq!(function.selector().0, [0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn test_parse_tuple_argument() {
        let function = parse_function("f(address,(uint256,bool))").unwrap();
        assert_eq!(function.inputs.len(), 2);

        let tuple = &function.inputs[1];
        assert_eq!(tuple.ty, "tuple");
        assert_eq!(tuple.components.len(), 2);
        assert_eq!(tuple.components[0].ty, "uint256");
        assert_eq!(tuple.components[1].ty, "bool");
        assert_eq!(function.signature(), "f(address,(uint256,bool))");
    }

    #[test]
    fn test_parse_invalid_signature() {
        assert!(matches!(parse_function("approve"), Err(AppError::Parse(_))));
        assert!(matches!(parse_function("approve(address"), Err(AppError::Parse(_))));
    }
}
