//! # 비트 유틸리티
//!
//! 역할 비트마스크를 고정 폭 이진 자릿수 배열로 변환하는 함수들입니다.

/// 값을 `width` 자리의 이진 자릿수 배열로 변환합니다.
///
/// 최상위 비트가 인덱스 0에 옵니다. 값이 `width` 자리보다 짧으면 앞쪽을 0으로 채우고,
/// 길면 하위 `width` 자리만 남깁니다. 음수는 0으로 취급합니다.
///
/// # Arguments
///
/// * `value` - 변환할 값
/// * `width` - 결과 배열 길이 (역할 개수)
///
/// # Examples
///
/// ```rust,ignore
/// use crate::utils::bit_utils::binary_digits;
///
/// assert_eq!(binary_digits(3, 2), vec![1, 1]);
/// assert_eq!(binary_digits(2, 3), vec![0, 1, 0]);
/// ```
pub fn binary_digits(value: i64, width: usize) -> Vec<u8> {
    let value = value.max(0) as u64;
    (0..width)
        .rev()
        .map(|shift| {
            if shift >= u64::BITS as usize {
                0
            } else {
                ((value >> shift) & 1) as u8
            }
        })
        .collect()
}

/// 값이 정확히 하나의 비트만 켜져 있는지 확인합니다.
pub fn is_single_bit(value: i64) -> bool {
    value > 0 && (value & (value - 1)) == 0
}

/// 값이 `width` 자리 안에 표현되는지 확인합니다.
pub fn fits_width(value: i64, width: usize) -> bool {
    if value < 0 {
        return false;
    }
    if width >= 63 {
        return true;
    }
    value < (1_i64 << width)
}
