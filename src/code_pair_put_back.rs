// Copyright (c) IxMilia.  All Rights Reserved.  Licensed under the Apache License, Version 2.0.  See License.txt in the project root for license information.

use crate::code_pair_iter::CodePairIter;
use crate::{CodePair, DxfError, DxfResult};

/// Called with the fraction of the input consumed; returning `false` cancels loading.
pub type ProgressCallback<'a> = Box<dyn FnMut(f32) -> bool + 'a>;

const PROGRESS_STEP: f32 = 0.01;

/// The input stream: code pairs with put-back, progress reporting, and cancellation.
pub(crate) struct CodePairPutBack<'a> {
    top: Vec<DxfResult<CodePair>>,
    iter: Box<dyn CodePairIter>,
    callback: Option<ProgressCallback<'a>>,
    previous_position: f32,
    aborted: bool,
}

impl<'a> CodePairPutBack<'a> {
    pub fn from_code_pair_iter(iter: Box<dyn CodePairIter>) -> Self {
        CodePairPutBack {
            top: vec![],
            iter,
            callback: None,
            previous_position: 0.0,
            aborted: false,
        }
    }
    pub fn set_callback(&mut self, callback: ProgressCallback<'a>) {
        self.callback = Some(callback);
    }
    pub fn put_back(&mut self, item: DxfResult<CodePair>) {
        self.top.push(item);
    }
    pub fn aborted(&self) -> bool {
        self.aborted
    }
    pub fn is_binary(&self) -> bool {
        self.iter.is_binary()
    }
    /// The line (text) or byte offset (binary) of the reader.
    pub fn file_position(&self) -> usize {
        self.iter.file_position()
    }
    fn report_progress(&mut self) {
        if let Some(ref mut callback) = self.callback {
            let position = self.iter.relative_position();
            if position - self.previous_position >= PROGRESS_STEP {
                self.previous_position = position;
                if !callback(position) {
                    self.aborted = true;
                }
            }
        }
    }
}

impl<'a> Iterator for CodePairPutBack<'a> {
    type Item = DxfResult<CodePair>;

    fn next(&mut self) -> Option<DxfResult<CodePair>> {
        if self.aborted {
            return Some(Err(DxfError::Aborted(self.iter.file_position())));
        }

        match self.top.pop() {
            Some(item) => Some(item),
            None => {
                let pair = self.iter.next();
                self.report_progress();
                pair
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_pair_iter::DirectCodePairIter;

    fn pairs(count: usize) -> Box<dyn CodePairIter> {
        let mut pairs = vec![];
        for i in 0..count {
            pairs.push(CodePair::new_f64(10, i as f64));
        }
        Box::new(DirectCodePairIter::new(pairs))
    }

    #[test]
    fn put_back_is_returned_first() {
        let mut iter = CodePairPutBack::from_code_pair_iter(pairs(2));
        let first = iter.next().unwrap().unwrap();
        iter.put_back(Ok(first.clone()));
        assert_eq!(first, iter.next().unwrap().unwrap());
        assert_eq!(CodePair::new_f64(10, 1.0), iter.next().unwrap().unwrap());
        assert!(iter.next().is_none());
    }

    #[test]
    fn callback_can_abort() {
        let mut calls = 0;
        {
            let mut iter = CodePairPutBack::from_code_pair_iter(pairs(10));
            iter.set_callback(Box::new(|_| {
                calls += 1;
                calls < 3
            }));
            let mut read = 0;
            while let Some(Ok(_)) = iter.next() {
                read += 1;
            }
            assert!(iter.aborted());
            assert_eq!(3, read);
            match iter.next() {
                Some(Err(e)) => assert!(e.is_aborted()),
                _ => panic!("expected an abort error"),
            }
        }
        assert_eq!(3, calls);
    }
}
