//! Catalog of optimiser steps that may appear in a chromosome.

use rand::Rng;

/// One Yul optimiser step, the gene of a [`Chromosome`](super::Chromosome).
///
/// Each step has a single-character abbreviation; a chromosome is written
/// as the concatenation of its steps' abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptimisationStep {
    BlockFlattener,
    CircularReferencesPruner,
    CommonSubexpressionEliminator,
    ConditionalSimplifier,
    ConditionalUnsimplifier,
    ControlFlowSimplifier,
    DeadCodeEliminator,
    EquivalentFunctionCombiner,
    ExpressionInliner,
    ExpressionJoiner,
    ExpressionSimplifier,
    ExpressionSplitter,
    ForLoopConditionIntoBody,
    ForLoopConditionOutOfBody,
    ForLoopInitRewriter,
    FullInliner,
    FunctionGrouper,
    FunctionHoister,
    LiteralRematerialiser,
    LoadResolver,
    LoopInvariantCodeMotion,
    RedundantAssignEliminator,
    Rematerialiser,
    SsaReverser,
    SsaTransform,
    StructuralSimplifier,
    UnusedPruner,
    VarDeclInitializer,
}

use OptimisationStep::*;

impl OptimisationStep {
    /// Every step in the catalog, in a fixed order.
    ///
    /// Random gene draws index into this array, so its order is part of
    /// the reproducibility contract.
    pub const ALL: [OptimisationStep; 28] = [
        BlockFlattener,
        CircularReferencesPruner,
        CommonSubexpressionEliminator,
        ConditionalSimplifier,
        ConditionalUnsimplifier,
        ControlFlowSimplifier,
        DeadCodeEliminator,
        EquivalentFunctionCombiner,
        ExpressionInliner,
        ExpressionJoiner,
        ExpressionSimplifier,
        ExpressionSplitter,
        ForLoopConditionIntoBody,
        ForLoopConditionOutOfBody,
        ForLoopInitRewriter,
        FullInliner,
        FunctionGrouper,
        FunctionHoister,
        LiteralRematerialiser,
        LoadResolver,
        LoopInvariantCodeMotion,
        RedundantAssignEliminator,
        Rematerialiser,
        SsaReverser,
        SsaTransform,
        StructuralSimplifier,
        UnusedPruner,
        VarDeclInitializer,
    ];

    /// Single-character abbreviation used in chromosome strings.
    pub fn abbreviation(self) -> char {
        match self {
            BlockFlattener => 'f',
            CircularReferencesPruner => 'l',
            CommonSubexpressionEliminator => 'c',
            ConditionalSimplifier => 'C',
            ConditionalUnsimplifier => 'U',
            ControlFlowSimplifier => 'n',
            DeadCodeEliminator => 'D',
            EquivalentFunctionCombiner => 'v',
            ExpressionInliner => 'e',
            ExpressionJoiner => 'j',
            ExpressionSimplifier => 's',
            ExpressionSplitter => 'x',
            ForLoopConditionIntoBody => 'I',
            ForLoopConditionOutOfBody => 'O',
            ForLoopInitRewriter => 'o',
            FullInliner => 'i',
            FunctionGrouper => 'g',
            FunctionHoister => 'h',
            LiteralRematerialiser => 'T',
            LoadResolver => 'L',
            LoopInvariantCodeMotion => 'M',
            RedundantAssignEliminator => 'r',
            Rematerialiser => 'm',
            SsaReverser => 'V',
            SsaTransform => 'a',
            StructuralSimplifier => 't',
            UnusedPruner => 'u',
            VarDeclInitializer => 'd',
        }
    }

    /// Full name of the step as known to the optimiser.
    pub fn name(self) -> &'static str {
        match self {
            BlockFlattener => "BlockFlattener",
            CircularReferencesPruner => "CircularReferencesPruner",
            CommonSubexpressionEliminator => "CommonSubexpressionEliminator",
            ConditionalSimplifier => "ConditionalSimplifier",
            ConditionalUnsimplifier => "ConditionalUnsimplifier",
            ControlFlowSimplifier => "ControlFlowSimplifier",
            DeadCodeEliminator => "DeadCodeEliminator",
            EquivalentFunctionCombiner => "EquivalentFunctionCombiner",
            ExpressionInliner => "ExpressionInliner",
            ExpressionJoiner => "ExpressionJoiner",
            ExpressionSimplifier => "ExpressionSimplifier",
            ExpressionSplitter => "ExpressionSplitter",
            ForLoopConditionIntoBody => "ForLoopConditionIntoBody",
            ForLoopConditionOutOfBody => "ForLoopConditionOutOfBody",
            ForLoopInitRewriter => "ForLoopInitRewriter",
            FullInliner => "FullInliner",
            FunctionGrouper => "FunctionGrouper",
            FunctionHoister => "FunctionHoister",
            LiteralRematerialiser => "LiteralRematerialiser",
            LoadResolver => "LoadResolver",
            LoopInvariantCodeMotion => "LoopInvariantCodeMotion",
            RedundantAssignEliminator => "RedundantAssignEliminator",
            Rematerialiser => "Rematerialiser",
            SsaReverser => "SSAReverser",
            SsaTransform => "SSATransform",
            StructuralSimplifier => "StructuralSimplifier",
            UnusedPruner => "UnusedPruner",
            VarDeclInitializer => "VarDeclInitializer",
        }
    }

    /// Looks up a step by its abbreviation.
    pub fn from_abbreviation(abbreviation: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.abbreviation() == abbreviation)
    }

    /// Draws a step uniformly from the catalog.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}
